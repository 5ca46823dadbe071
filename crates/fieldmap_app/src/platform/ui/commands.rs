use std::path::PathBuf;

use fieldmap_core::{Msg, SiteStatus};

pub const HELP: &str = "\
Commands:
  upload <file>     load a csv/xlsx site list
  tap <label>       tap a map marker, e.g. `tap Ticket: 42`
  search [text]     find a ticket; empty clears the search
  enroute | complete | noaccess | pending
                    mark the selected site
  status <label>    same, by label (e.g. `status No Access`)
  photo <file>      attach a photo to the selected site
  deselect          close the selected site
  export            zip every captured photo
  reset             delete all progress and photos
  show              print every pin
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    /// Read a photo from disk and hand it over as if the camera took it.
    CapturePhoto(PathBuf),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Status(#[from] fieldmap_core::UnknownStatus),
}

/// Parse one input line; blank lines are `None`.
pub fn parse_command(line: &str) -> Option<Result<Command, CommandError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let required = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest)
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "upload" | "open" => required("upload").map(|p| Command::Dispatch(Msg::FileChosen(p.into()))),
        "tap" => required("tap").map(|label| Command::Dispatch(Msg::MarkerTapped(label.to_string()))),
        "search" | "find" => Ok(Command::Dispatch(Msg::SearchChanged(rest.to_string()))),
        "enroute" | "next" => Ok(status(SiteStatus::EnRoute)),
        "complete" | "done" => Ok(status(SiteStatus::Completed)),
        "noaccess" => Ok(status(SiteStatus::NoAccess)),
        "pending" | "reopen" => Ok(status(SiteStatus::Pending)),
        "status" => required("status")
            .and_then(|label| Ok(status(label.parse::<SiteStatus>()?))),
        "photo" => required("photo").map(|p| Command::CapturePhoto(p.into())),
        "deselect" | "close" => Ok(Command::Dispatch(Msg::Deselect)),
        "export" => Ok(Command::Dispatch(Msg::ExportPhotosClicked)),
        "reset" => Ok(Command::Dispatch(Msg::ResetClicked)),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    };
    Some(command)
}

fn status(status: SiteStatus) -> Command {
    Command::Dispatch(Msg::StatusChosen(status))
}

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use fieldmap_core::{update, AppState, AppViewModel, Msg};
use fieldmap_logging::{fieldmap_debug, fieldmap_error, fieldmap_info, fieldmap_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::{render_text, write_map};

pub fn run_app(config: AppConfig, upload: Option<PathBuf>) -> anyhow::Result<()> {
    let mut app = App::new(EffectRunner::new(&config), config.map_path());
    app.start(upload);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run_session(stdin.lock(), stdout.lock())?;
    Ok(())
}

struct App {
    state: AppState,
    inbox: VecDeque<Msg>,
    runner: EffectRunner,
    map_path: PathBuf,
}

impl App {
    fn new(runner: EffectRunner, map_path: PathBuf) -> Self {
        Self {
            state: AppState::new(),
            inbox: VecDeque::new(),
            runner,
            map_path,
        }
    }

    /// Resume from the work log when one exists; otherwise upload `upload`, if given.
    fn start(&mut self, upload: Option<PathBuf>) {
        match self.runner.work_log().load() {
            Ok(Some(records)) => {
                if upload.is_some() {
                    fieldmap_info!("Work log found; ignoring upload argument and resuming");
                }
                self.post(Msg::RestoreRecords(records));
            }
            Ok(None) => {
                if let Some(path) = upload {
                    self.post(Msg::FileChosen(path));
                }
            }
            Err(err) => {
                fieldmap_warn!(
                    "Ignoring unreadable work log {:?}: {}",
                    self.runner.work_log().path(),
                    err
                );
                if let Some(path) = upload {
                    self.post(Msg::FileChosen(path));
                }
            }
        }
    }

    fn post(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
    }

    /// Read one command per line until EOF or `quit`, rendering after each change.
    fn run_session<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        self.process_pending_messages(&mut output, false)?;
        write!(output, "{}", render_text(&self.state.view(), false))?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let Some(parsed) = parse_command(&line) else {
                continue;
            };
            let mut show_pins = false;
            match parsed {
                Ok(Command::Dispatch(msg)) => self.post(msg),
                Ok(Command::CapturePhoto(path)) => match fs::read(&path) {
                    Ok(bytes) => self.post(Msg::PhotoCaptured(bytes)),
                    Err(err) => writeln!(output, "Cannot read photo {}: {}", path.display(), err)?,
                },
                Ok(Command::Show) => show_pins = true,
                Ok(Command::Help) => writeln!(output, "{HELP}")?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(output, "{err}")?,
            }
            self.process_pending_messages(&mut output, show_pins)?;
            output.flush()?;
        }
        Ok(())
    }

    fn process_pending_messages<W: Write>(&mut self, output: &mut W, force: bool) -> io::Result<()> {
        let mut rendered = false;
        while let Some(msg) = self.inbox.pop_front() {
            if let Some(view) = self.dispatch_msg(msg) {
                self.publish(&view);
                write!(output, "{}", render_text(&view, force))?;
                rendered = true;
            }
        }
        if force && !rendered {
            write!(output, "{}", render_text(&self.state.view(), true))?;
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> Option<AppViewModel> {
        fieldmap_debug!("dispatch {}", describe(&msg));
        let is_upload_reply = matches!(msg, Msg::TableLoaded(_));

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        if is_upload_reply {
            if let Some(summary) = view.last_ingest {
                fieldmap_info!(
                    "Ingested {} site(s); {} row(s) skipped for bad coordinates; positional columns: {}",
                    summary.record_count,
                    summary.skipped_rows,
                    summary.positional
                );
            }
        }

        for reply in self.runner.run(effects) {
            self.post(reply);
        }

        was_dirty.then_some(view)
    }

    fn publish(&self, view: &AppViewModel) {
        if let Err(err) = write_map(&self.map_path, view) {
            fieldmap_error!("Failed to write map document {:?}: {}", self.map_path, err);
        }
    }
}

/// Log-friendly message name; photo payloads are summarised by size.
fn describe(msg: &Msg) -> String {
    match msg {
        Msg::PhotoCaptured(bytes) => format!("PhotoCaptured({} bytes)", bytes.len()),
        Msg::TableLoaded(table) => format!("TableLoaded({} rows)", table.rows.len()),
        Msg::RestoreRecords(records) => format!("RestoreRecords({} sites)", records.len()),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixed_clock() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 15))
            .expect("valid date")
    }

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_path_buf(),
            ..AppConfig::default()
        }
    }

    fn app_in(dir: &Path) -> App {
        let config = config_in(dir);
        App::new(
            EffectRunner::new(&config).with_clock(fixed_clock),
            config.map_path(),
        )
    }

    fn run_script(app: &mut App, script: &str) -> String {
        let mut out = Vec::new();
        app.run_session(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn write_sites(dir: &Path) -> PathBuf {
        let path = dir.join("sites.csv");
        fs::write(
            &path,
            "Ticket Numbers,lat,lon,Notes\n142,10,-5,side door\n42,20,-1,\n423,15,-3,\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn upload_tap_and_complete_persist_progress() {
        let temp = TempDir::new().unwrap();
        let sites = write_sites(temp.path());
        let mut app = app_in(temp.path());

        let script = format!(
            "upload {}\ntap Ticket: 42\ncomplete\nsearch 423\nnoaccess\n",
            sites.display()
        );
        let out = run_script(&mut app, &script);

        assert!(out.contains("Sites: 3 | Pending 3"));
        assert!(out.contains("Selected: Ticket 42 [Pending]"));
        assert!(out.contains("Ticket 42 marked Completed."));
        assert!(out.contains("zoom 18"));

        let log = fs::read_to_string(temp.path().join("work_log.csv")).unwrap();
        assert!(log.contains("42,20.0,-1.0,No notes,Completed"));
        assert!(log.contains("423,15.0,-3.0,No notes,No Access"));

        let map: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("map.json")).unwrap())
                .unwrap();
        assert_eq!(map["pins"].as_array().unwrap().len(), 3);
        assert_eq!(map["selected"], "423");
    }

    #[test]
    fn restart_resumes_from_work_log() {
        let temp = TempDir::new().unwrap();
        let sites = write_sites(temp.path());
        let mut first = app_in(temp.path());
        run_script(
            &mut first,
            &format!("upload {}\ntap ID:142\nenroute\n", sites.display()),
        );

        let mut second = app_in(temp.path());
        second.start(Some(temp.path().join("other.csv")));
        let out = run_script(&mut second, "show\n");

        assert!(out.contains("En Route 1"));
        assert!(out.contains("Ticket: 142"));
    }

    #[test]
    fn bad_upload_prompts_retry() {
        let temp = TempDir::new().unwrap();
        let narrow = temp.path().join("narrow.csv");
        fs::write(&narrow, "ticket,lat\n1,2\n").unwrap();
        let mut app = app_in(temp.path());

        let out = run_script(&mut app, &format!("upload {}\n", narrow.display()));

        assert!(out.contains("Could not load sites"));
        assert!(out.contains("Upload your location list"));
        assert!(!temp.path().join("work_log.csv").exists());
    }

    #[test]
    fn photo_and_export_then_reset() {
        let temp = TempDir::new().unwrap();
        let sites = write_sites(temp.path());
        let shot = temp.path().join("shot.jpg");
        fs::write(&shot, b"fake jpeg").unwrap();
        let mut app = app_in(temp.path());

        let out = run_script(
            &mut app,
            &format!(
                "upload {}\ntap Ticket: 142\nphoto {}\nexport\n",
                sites.display(),
                shot.display()
            ),
        );

        assert!(out.contains("Photo saved for ticket 142 as Ticket_142_093015.jpg."));
        assert!(out.contains("Exported 1 photo(s)"));
        assert!(temp.path().join("Photos_2024-05-01.zip").is_file());
        assert!(temp
            .path()
            .join("captured_photos")
            .join("Ticket_142_093015.jpg")
            .is_file());

        let out = run_script(&mut app, "reset\n");

        assert!(out.contains("Upload your location list"));
        assert!(!temp.path().join("work_log.csv").exists());
        assert!(!temp
            .path()
            .join("captured_photos")
            .join("Ticket_142_093015.jpg")
            .exists());
    }

    #[test]
    fn malformed_tap_asks_to_tap_again() {
        let temp = TempDir::new().unwrap();
        let sites = write_sites(temp.path());
        let mut app = app_in(temp.path());

        let out = run_script(
            &mut app,
            &format!("upload {}\ntap nothing here\nbogus\n", sites.display()),
        );

        assert!(out.contains("Tap again to select pin."));
        assert!(out.contains("unknown command \"bogus\""));
    }
}

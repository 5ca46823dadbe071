use crate::{
    ingest_with_report, select_by_query, select_by_tap, AppState, Effect, IngestMode, Msg, Notice,
    SessionPhase, SiteStatus,
};

pub const TAP_AGAIN_HINT: &str = "Tap again to select pin.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(path) => match state.phase() {
            SessionPhase::AwaitingUpload => {
                state.begin_loading();
                vec![Effect::LoadTable { path }]
            }
            SessionPhase::Loading => Vec::new(),
            // A loaded session is only replaced through an explicit reset.
            SessionPhase::Mapping => {
                state.set_notice(Notice::Warning(
                    "Reset all data before uploading a new file.".to_string(),
                ));
                Vec::new()
            }
        },
        Msg::TableLoaded(table) => {
            if state.phase() != SessionPhase::Loading {
                return (state, Vec::new());
            }
            match ingest_with_report(&table, IngestMode::Fresh) {
                Ok(report) => {
                    state.commit_ingest(report);
                    vec![Effect::PersistRecords {
                        records: state.records().clone(),
                    }]
                }
                Err(err) => {
                    state.fail_loading(format!("Could not load sites: {err}. Upload another file."));
                    Vec::new()
                }
            }
        }
        Msg::TableLoadFailed(reason) => {
            if state.phase() == SessionPhase::Loading {
                state.fail_loading(format!("Could not read file: {reason}. Upload another file."));
            }
            Vec::new()
        }
        Msg::RestoreRecords(records) => {
            if state.phase() == SessionPhase::AwaitingUpload && !records.is_empty() {
                state.restore(records);
            }
            Vec::new()
        }
        Msg::MarkerTapped(payload) => {
            if state.phase() == SessionPhase::Mapping {
                match select_by_tap(state.records(), &payload) {
                    Ok(id) => state.select(id),
                    Err(_) => state.set_notice(Notice::Warning(TAP_AGAIN_HINT.to_string())),
                }
            }
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            let query = query.trim().to_string();
            match select_by_query(state.records(), &query) {
                Some(id) => state.focus_on(id),
                None if query.is_empty() => state.clear_focus(),
                None => {
                    state.clear_focus();
                    state.set_notice(Notice::Info(format!("No ticket matches {query:?}.")));
                }
            }
            state.set_query(query);
            Vec::new()
        }
        Msg::StatusChosen(status) => {
            let Some(id) = state.selection().map(str::to_owned) else {
                return (state, Vec::new());
            };
            if state.apply_status(&id, status) == 0 {
                return (state, Vec::new());
            }
            // Marking a site complete confirms the visit and closes its panel.
            if status == SiteStatus::Completed {
                state.clear_selection();
            }
            state.set_notice(Notice::Info(format!("Ticket {id} marked {status}.")));
            vec![Effect::PersistRecords {
                records: state.records().clone(),
            }]
        }
        Msg::Deselect => {
            state.clear_selection();
            state.clear_focus();
            Vec::new()
        }
        Msg::PhotoCaptured(bytes) => match state.selection() {
            Some(id) => vec![Effect::SavePhoto {
                site_id: id.to_string(),
                bytes,
            }],
            None => {
                state.set_notice(Notice::Warning(
                    "Select a site before taking a photo.".to_string(),
                ));
                Vec::new()
            }
        },
        Msg::PhotoSaved { site_id, file_name } => {
            state.set_notice(Notice::Info(format!(
                "Photo saved for ticket {site_id} as {file_name}."
            )));
            Vec::new()
        }
        Msg::PhotoFailed(reason) => {
            state.set_notice(Notice::Error(format!("Photo not saved: {reason}")));
            Vec::new()
        }
        Msg::ExportPhotosClicked => vec![Effect::ExportPhotos],
        Msg::PhotosExported {
            photo_count,
            archive,
        } => {
            state.set_notice(Notice::Info(format!(
                "Exported {photo_count} photo(s) to {archive}."
            )));
            Vec::new()
        }
        Msg::ExportFailed(reason) => {
            state.set_notice(Notice::Error(format!("Export failed: {reason}")));
            Vec::new()
        }
        Msg::ResetClicked => {
            state = AppState::new();
            state.mark_dirty();
            vec![Effect::ClearStore]
        }
    };

    (state, effects)
}

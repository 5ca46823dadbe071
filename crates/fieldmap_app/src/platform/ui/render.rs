use std::fmt::Write;
use std::path::Path;

use fieldmap_core::{AppViewModel, Notice, SessionPhase};
use fieldmap_engine::{write_atomic, PersistError};
use serde_json::{json, Value};

/// Text panel shown after every state change.
pub fn render_text(view: &AppViewModel, include_pins: bool) -> String {
    let mut out = String::new();

    match view.phase {
        SessionPhase::AwaitingUpload => {
            let _ = writeln!(out, "Upload your location list to start: upload <file>");
        }
        SessionPhase::Loading => {
            let _ = writeln!(out, "Loading sites...");
        }
        SessionPhase::Mapping => {
            let counts = &view.counts;
            let _ = writeln!(
                out,
                "Sites: {} | Pending {} | En Route {} | Completed {} | No Access {}",
                view.pins.len(),
                counts.pending,
                counts.en_route,
                counts.completed,
                counts.no_access
            );
            if let Some(framing) = &view.framing {
                let _ = writeln!(
                    out,
                    "Map: centre {:.5}, {:.5} zoom {} | bounds {:.5}, {:.5} .. {:.5}, {:.5}",
                    framing.center.latitude,
                    framing.center.longitude,
                    framing.zoom,
                    framing.bounds.south_west.latitude,
                    framing.bounds.south_west.longitude,
                    framing.bounds.north_east.latitude,
                    framing.bounds.north_east.longitude
                );
            }
            if !view.query.is_empty() {
                let _ = writeln!(out, "Search: {:?}", view.query);
            }
            match &view.selected {
                Some(site) => {
                    let _ = writeln!(
                        out,
                        "Selected: Ticket {} [{}] at {:.5}, {:.5} - {}",
                        site.id, site.status, site.latitude, site.longitude, site.notes
                    );
                    let _ = writeln!(
                        out,
                        "  enroute | complete | noaccess | photo <file> | deselect"
                    );
                }
                None => {
                    let _ = writeln!(out, "Tap a pin to select a site: tap Ticket: <id>");
                }
            }
            if include_pins {
                for pin in &view.pins {
                    let marker = if pin.selected { '*' } else { ' ' };
                    let _ = writeln!(
                        out,
                        " {marker} Ticket: {:<12} {:<10} {:<7} {:.5}, {:.5}",
                        pin.id,
                        pin.status.label(),
                        pin.color.name(),
                        pin.latitude,
                        pin.longitude
                    );
                }
            }
        }
    }

    if let Some(notice) = &view.notice {
        let prefix = match notice {
            Notice::Info(_) => "i",
            Notice::Warning(_) => "!",
            Notice::Error(_) => "x",
        };
        let _ = writeln!(out, "[{prefix}] {}", notice.text());
    }
    out
}

/// Document consumed by the map viewer: pins with colours plus framing.
pub fn map_document(view: &AppViewModel) -> Value {
    let pins: Vec<Value> = view
        .pins
        .iter()
        .map(|pin| {
            json!({
                "id": pin.id,
                "popup": format!("Ticket: {}", pin.id),
                "lat": pin.latitude,
                "lon": pin.longitude,
                "notes": pin.notes,
                "status": pin.status.label(),
                "color": pin.color.name(),
                "selected": pin.selected,
            })
        })
        .collect();

    let framing = view.framing.map(|framing| {
        json!({
            "center": [framing.center.latitude, framing.center.longitude],
            "zoom": framing.zoom,
            "bounds": [
                [framing.bounds.south_west.latitude, framing.bounds.south_west.longitude],
                [framing.bounds.north_east.latitude, framing.bounds.north_east.longitude],
            ],
        })
    });

    json!({
        "selected": view.selected.as_ref().map(|site| site.id.clone()),
        "framing": framing,
        "pins": pins,
    })
}

pub fn write_map(path: &Path, view: &AppViewModel) -> Result<(), PersistError> {
    let content = serde_json::to_string_pretty(&map_document(view))
        .map_err(|e| PersistError::Io(e.into()))?;
    write_atomic(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::{update, AppState, Msg, RecordSet, SiteRecord, SiteStatus};

    fn mapped_view() -> AppViewModel {
        let records: RecordSet = vec![
            SiteRecord::new("1", 10.0, -5.0),
            SiteRecord::new("2", 20.0, -1.0).with_status(SiteStatus::NoAccess),
        ]
        .into();
        let (state, _) = update(AppState::new(), Msg::RestoreRecords(records));
        let (state, _) = update(state, Msg::MarkerTapped("Ticket: 1".into()));
        state.view()
    }

    #[test]
    fn text_shows_counts_selection_and_pins() {
        let text = render_text(&mapped_view(), true);

        assert!(text.contains("Sites: 2 | Pending 1 | En Route 0 | Completed 0 | No Access 1"));
        assert!(text.contains("Selected: Ticket 1 [Pending]"));
        assert!(text.contains("zoom 14"));
        assert!(text.contains("purple"));
        assert!(text.contains("red"));
    }

    #[test]
    fn awaiting_upload_prompts_for_file() {
        let text = render_text(&AppState::new().view(), false);

        assert!(text.starts_with("Upload your location list"));
    }

    #[test]
    fn map_document_lists_pins_and_framing() {
        let doc = map_document(&mapped_view());

        assert_eq!(doc["selected"], "1");
        assert_eq!(doc["pins"].as_array().unwrap().len(), 2);
        assert_eq!(doc["pins"][0]["color"], "purple");
        assert_eq!(doc["pins"][1]["color"], "red");
        assert_eq!(doc["pins"][1]["popup"], "Ticket: 2");
        assert_eq!(doc["framing"]["zoom"], 14);
        assert_eq!(doc["framing"]["center"][0], 15.0);
        assert_eq!(doc["framing"]["bounds"][1][1], -1.0);
    }

    #[test]
    fn map_document_has_no_framing_before_upload() {
        let doc = map_document(&AppState::new().view());

        assert!(doc["framing"].is_null());
        assert!(doc["pins"].as_array().unwrap().is_empty());
    }
}

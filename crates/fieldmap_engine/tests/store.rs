use std::fs;

use fieldmap_core::{RecordSet, SiteRecord, SiteStatus, NO_NOTES};
use fieldmap_engine::{StoreError, WorkLog, WORK_LOG_FILENAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample() -> RecordSet {
    vec![
        SiteRecord::new("1001", 39.95, -75.16).with_notes("Gate code 12, ring bell"),
        SiteRecord::new("1002", 39.96, -75.17).with_status(SiteStatus::EnRoute),
        SiteRecord::new("1003", 39.97, -75.18).with_status(SiteStatus::Completed),
        SiteRecord::new("1004", 39.98, -75.19).with_status(SiteStatus::NoAccess),
    ]
    .into()
}

#[test]
fn missing_log_loads_as_none() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), WORK_LOG_FILENAME);

    assert!(!log.path().exists());
    assert!(log.load().unwrap().is_none());
}

#[test]
fn saved_log_restores_statuses_and_notes() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), WORK_LOG_FILENAME);

    log.save(&sample()).unwrap();
    let restored = log.load().unwrap().unwrap();

    assert_eq!(restored, sample());
}

#[test]
fn log_uses_readable_header_and_labels() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), WORK_LOG_FILENAME);

    let path = log.save(&sample()).unwrap();
    let content = fs::read_to_string(path).unwrap();
    let mut lines = content.lines();

    assert_eq!(lines.next(), Some("Ticket Numbers,lat,lon,notes,status"));
    assert!(content.contains("\"Gate code 12, ring bell\""));
    assert!(content.contains(",En Route"));
    assert!(content.contains(",No Access"));
    assert!(content.contains(&format!(",{NO_NOTES},Completed")));
}

#[test]
fn save_overwrites_previous_log() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), WORK_LOG_FILENAME);
    log.save(&sample()).unwrap();

    let mut records = sample();
    records.apply_transition("1001", SiteStatus::Completed);
    log.save(&records).unwrap();

    let restored = log.load().unwrap().unwrap();
    assert_eq!(restored.status_of("1001"), Some(SiteStatus::Completed));
    assert_eq!(restored.len(), 4);
}

#[test]
fn clear_removes_log() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), "progress.csv");
    log.save(&sample()).unwrap();

    assert!(log.clear().unwrap());
    assert!(!log.path().exists());
    assert!(!log.clear().unwrap());
}

#[test]
fn corrupt_log_is_reported() {
    let temp = TempDir::new().unwrap();
    let log = WorkLog::new(temp.path(), WORK_LOG_FILENAME);
    fs::write(log.path(), "just,two\n").unwrap();

    assert!(matches!(log.load(), Err(StoreError::Ingest(_))));
}

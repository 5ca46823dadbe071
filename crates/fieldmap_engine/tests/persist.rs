use std::fs;

use fieldmap_engine::{ensure_data_dir, remove_if_exists, write_atomic, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("field").join("day1");

    ensure_data_dir(&nested).unwrap();
    ensure_data_dir(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn file_in_place_of_data_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("data");
    fs::write(&blocker, "x").unwrap();

    assert!(matches!(
        ensure_data_dir(&blocker),
        Err(PersistError::NotADirectory(path)) if path == blocker
    ));
}

#[test]
fn atomic_write_replaces_existing_and_creates_parent() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("field").join("work_log.csv");

    write_atomic(&target, "first").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "first");

    write_atomic(&target, b"second").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    assert_eq!(fs::read_dir(target.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    assert!(write_atomic(&blocker.join("work_log.csv"), "data").is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}

#[test]
fn removing_missing_file_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gone.csv");

    assert!(!remove_if_exists(&path).unwrap());
    fs::write(&path, "x").unwrap();
    assert!(remove_if_exists(&path).unwrap());
    assert!(!path.exists());
}

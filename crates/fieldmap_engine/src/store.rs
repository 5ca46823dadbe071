//! Work log: the CSV file holding the record set between runs.

use std::fs;
use std::io;
use std::path::PathBuf;

use fieldmap_core::{ingest_with_report, IngestError, IngestMode, RecordSet};
use fieldmap_logging::{fieldmap_debug, fieldmap_info};
use serde::Serialize;
use thiserror::Error;

use crate::persist::{remove_if_exists, write_atomic, PersistError};
use crate::table::{decode_text, parse_csv, TableError};

pub const WORK_LOG_FILENAME: &str = "work_log.csv";
const HEADERS: [&str; 5] = ["Ticket Numbers", "lat", "lon", "notes", "status"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("work log unreadable: {0}")]
    Table(#[from] TableError),
    #[error("work log holds no usable sites: {0}")]
    Ingest(#[from] IngestError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Serialize)]
struct PersistedSite<'a> {
    id: &'a str,
    lat: f64,
    lon: f64,
    notes: &'a str,
    status: &'static str,
}

#[derive(Debug, Clone)]
pub struct WorkLog {
    dir: PathBuf,
    filename: String,
}

impl WorkLog {
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    /// Load the saved record set with statuses preserved; `None` when no log exists.
    pub fn load(&self) -> Result<Option<RecordSet>, StoreError> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let table = parse_csv(&decode_text(bytes), b',')?;
        let report = ingest_with_report(&table, IngestMode::Resume)?;
        fieldmap_info!(
            "Loaded {} site(s) from work log {:?}",
            report.records.len(),
            path
        );
        Ok(Some(report.records))
    }

    pub fn save(&self, records: &RecordSet) -> Result<PathBuf, StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for record in records {
            writer.serialize(PersistedSite {
                id: &record.id,
                lat: record.latitude,
                lon: record.longitude,
                notes: &record.notes,
                status: record.status.label(),
            })?;
        }
        let content = writer.into_inner().map_err(|e| e.into_error())?;

        let path = self.path();
        write_atomic(&path, content)?;
        fieldmap_debug!("Saved {} site(s) to {:?}", records.len(), path);
        Ok(path)
    }

    /// Delete the log; returns whether a file was removed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        Ok(remove_if_exists(&self.path())?)
    }
}

//! Application configuration, read from an optional RON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fieldmap_engine::{PhotoStore, WorkLog, PHOTO_DIRNAME, WORK_LOG_FILENAME};
use fieldmap_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "fieldmap.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the work log, photos and map document.
    pub data_dir: PathBuf,
    pub work_log: String,
    pub photo_dir: String,
    pub map_file: String,
    /// Where photo archives go; defaults to `data_dir`.
    pub export_dir: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            work_log: WORK_LOG_FILENAME.to_string(),
            photo_dir: PHOTO_DIRNAME.to_string(),
            map_file: "map.json".to_string(),
            export_dir: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn work_log(&self) -> WorkLog {
        WorkLog::new(&self.data_dir, &self.work_log)
    }

    pub fn photo_store(&self) -> PhotoStore {
        PhotoStore::new(self.data_dir.join(&self.photo_dir))
    }

    pub fn map_path(&self) -> PathBuf {
        self.data_dir.join(&self.map_file)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(data_dir: "field", log_destination: Both, log_level: "debug")"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("field"));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.work_log, WORK_LOG_FILENAME);
        assert_eq!(config.map_path(), PathBuf::from("field").join("map.json"));
        assert_eq!(config.export_dir(), PathBuf::from("field"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(data_dir: ").unwrap();

        assert!(AppConfig::load(&path).is_err());
    }
}

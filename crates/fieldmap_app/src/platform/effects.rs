use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use fieldmap_core::{Effect, Msg};
use fieldmap_engine::{archive_filename, read_table, PhotoStore, WorkLog};
use fieldmap_logging::{fieldmap_error, fieldmap_info, fieldmap_warn};

use super::config::AppConfig;

pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Executes effects synchronously; replies come back as messages for the inbox.
pub struct EffectRunner {
    work_log: WorkLog,
    photos: PhotoStore,
    export_dir: PathBuf,
    clock: Clock,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            work_log: config.work_log(),
            photos: config.photo_store(),
            export_dir: config.export_dir(),
            clock: local_now,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn work_log(&self) -> &WorkLog {
        &self.work_log
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        effects
            .into_iter()
            .filter_map(|effect| self.run_one(effect))
            .collect()
    }

    fn run_one(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadTable { path } => {
                fieldmap_info!("LoadTable path={:?}", path);
                match read_table(&path) {
                    Ok(table) => {
                        fieldmap_info!(
                            "Read {} row(s), {} column(s) from {:?}",
                            table.rows.len(),
                            table.column_count(),
                            path
                        );
                        Some(Msg::TableLoaded(table))
                    }
                    Err(err) => {
                        fieldmap_warn!("Could not read {:?}: {}", path, err);
                        Some(Msg::TableLoadFailed(err.to_string()))
                    }
                }
            }
            Effect::PersistRecords { records } => {
                if let Err(err) = self.work_log.save(&records) {
                    fieldmap_error!(
                        "Failed to write work log {:?}: {}",
                        self.work_log.path(),
                        err
                    );
                }
                None
            }
            Effect::SavePhoto { site_id, bytes } => {
                let stamp = (self.clock)().format("%H%M%S").to_string();
                match self.photos.save(&site_id, &bytes, &stamp) {
                    Ok(path) => {
                        let file_name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        Some(Msg::PhotoSaved { site_id, file_name })
                    }
                    Err(err) => {
                        fieldmap_error!("Failed to save photo for site {}: {}", site_id, err);
                        Some(Msg::PhotoFailed(err.to_string()))
                    }
                }
            }
            Effect::ExportPhotos => {
                let date = (self.clock)().format("%Y-%m-%d").to_string();
                match self
                    .photos
                    .export_zip(&self.export_dir, &archive_filename(&date))
                {
                    Ok(summary) => Some(Msg::PhotosExported {
                        photo_count: summary.photo_count,
                        archive: summary.archive_path.display().to_string(),
                    }),
                    Err(err) => {
                        fieldmap_warn!("Photo export failed: {}", err);
                        Some(Msg::ExportFailed(err.to_string()))
                    }
                }
            }
            Effect::ClearStore => {
                match self.work_log.clear() {
                    Ok(removed) => fieldmap_info!("Work log cleared (file removed: {})", removed),
                    Err(err) => fieldmap_error!("Failed to clear work log: {}", err),
                }
                match self.photos.clear() {
                    Ok(count) => fieldmap_info!("Removed {} photo(s)", count),
                    Err(err) => fieldmap_error!("Failed to clear photos: {}", err),
                }
                None
            }
        }
    }
}

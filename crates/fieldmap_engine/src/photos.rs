//! Captured photos on disk and their zip export.

use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use fieldmap_logging::{fieldmap_info, fieldmap_warn};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::filename::photo_filename;
use crate::persist::{ensure_data_dir, write_atomic, PersistError};

pub const PHOTO_DIRNAME: &str = "captured_photos";

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("no photos captured yet")]
    NoPhotos,
    #[error("photo is empty")]
    EmptyPhoto,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub photo_count: usize,
    pub archive_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save a photo for `site_id`; `stamp` is the capture time (`HHMMSS`).
    ///
    /// A second photo with the same name gets a numeric suffix instead of
    /// replacing the first.
    pub fn save(&self, site_id: &str, bytes: &[u8], stamp: &str) -> Result<PathBuf, PhotoError> {
        if bytes.is_empty() {
            return Err(PhotoError::EmptyPhoto);
        }
        ensure_data_dir(&self.dir)?;

        let base = photo_filename(site_id, stamp);
        let mut name = base.clone();
        let mut counter = 2;
        while self.dir.join(&name).exists() {
            let stem = base.trim_end_matches(".jpg");
            name = format!("{stem}-{counter}.jpg");
            counter += 1;
        }

        let path = self.dir.join(&name);
        write_atomic(&path, bytes)?;
        fieldmap_info!("Saved photo for site {} to {:?}", site_id, path);
        Ok(path)
    }

    /// Photo files in name order; a missing directory means no photos.
    pub fn list(&self) -> Result<Vec<PathBuf>, PhotoError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut photos: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .collect();
        photos.sort();
        Ok(photos)
    }

    /// Delete every photo and return how many were removed.
    pub fn clear(&self) -> Result<usize, PhotoError> {
        let photos = self.list()?;
        for photo in &photos {
            fs::remove_file(photo)?;
        }
        Ok(photos.len())
    }

    /// Bundle every photo into `{dest_dir}/{archive_name}`, keyed by file name.
    pub fn export_zip(&self, dest_dir: &Path, archive_name: &str) -> Result<ExportSummary, PhotoError> {
        let photos = self.list()?;
        if photos.is_empty() {
            return Err(PhotoError::NoPhotos);
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for photo in &photos {
            let Some(name) = photo.file_name().and_then(|n| n.to_str()) else {
                fieldmap_warn!("Skipping photo with non UTF-8 name {:?}", photo);
                continue;
            };
            zip.start_file(name, options)?;
            zip.write_all(&fs::read(photo)?)?;
        }
        let bytes = zip.finish()?.into_inner();

        let archive_path = dest_dir.join(archive_name);
        write_atomic(&archive_path, bytes)?;
        fieldmap_info!(
            "Exported {} photo(s) to {:?}",
            photos.len(),
            archive_path
        );
        Ok(ExportSummary {
            photo_count: photos.len(),
            archive_path,
        })
    }
}

//! Crash-safe file replacement for the work log, photos and archives.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0:?} exists but is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("{path:?} has no file name")]
    NoFileName { path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub fn ensure_data_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory(dir.to_path_buf())),
        Err(_) => fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, PersistError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Replace `target` with `bytes`, creating its directory if needed.
///
/// Readers see either the old file or the complete new one: the bytes go to a
/// sibling temp file which is synced and then renamed over `target`.
pub fn write_atomic(target: &Path, bytes: impl AsRef<[u8]>) -> Result<(), PersistError> {
    if target.file_name().is_none() {
        return Err(PersistError::NoFileName {
            path: target.to_path_buf(),
        });
    }
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_data_dir(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes.as_ref())?;
    staged.as_file().sync_all()?;
    staged.persist(target).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}

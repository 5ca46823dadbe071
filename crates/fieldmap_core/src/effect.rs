use std::path::PathBuf;

use crate::{RecordSet, SiteId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadTable { path: PathBuf },
    /// Rewrite the work log; emitted after every committed mutation.
    PersistRecords { records: RecordSet },
    SavePhoto { site_id: SiteId, bytes: Vec<u8> },
    ExportPhotos,
    /// Delete the work log and every captured photo.
    ClearStore,
}

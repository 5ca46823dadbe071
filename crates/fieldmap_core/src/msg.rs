use std::path::PathBuf;

use crate::{RawTable, RecordSet, SiteId, SiteStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a spreadsheet to upload.
    FileChosen(PathBuf),
    /// Table reader finished reading the chosen file.
    TableLoaded(RawTable),
    /// Table reader could not read the chosen file.
    TableLoadFailed(String),
    /// Restore the record set saved in the work log.
    RestoreRecords(RecordSet),
    /// User tapped a map marker; carries the marker label text.
    MarkerTapped(String),
    /// User edited the ticket search box.
    SearchChanged(String),
    /// User marked the selected site.
    StatusChosen(SiteStatus),
    /// User closed the detail panel.
    Deselect,
    /// Camera delivered a photo for the selected site.
    PhotoCaptured(Vec<u8>),
    PhotoSaved { site_id: SiteId, file_name: String },
    PhotoFailed(String),
    /// User asked for the photo archive.
    ExportPhotosClicked,
    PhotosExported { photo_count: usize, archive: String },
    ExportFailed(String),
    /// User clicked Reset All Data.
    ResetClicked,
}

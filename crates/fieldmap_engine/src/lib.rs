//! Field mapper engine: table readers, the work log and the photo store.
mod filename;
mod persist;
mod photos;
mod store;
mod table;

pub use filename::{archive_filename, photo_filename};
pub use persist::{ensure_data_dir, remove_if_exists, write_atomic, PersistError};
pub use photos::{ExportSummary, PhotoError, PhotoStore, PHOTO_DIRNAME};
pub use store::{StoreError, WorkLog, WORK_LOG_FILENAME};
pub use table::{
    decode_text, detect_format, parse_csv, parse_delimited, read_table, TableError, TableFormat,
};

//! Field mapper core: site ingestion, selection reconciliation and the pure
//! session state machine.
mod effect;
mod geo;
mod ingest;
mod msg;
mod record;
mod select;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use geo::{bounding_box, centroid, BoundingBox, GeoError, GeoPoint};
pub use ingest::{
    ingest, ingest_with_report, resolve_columns, Cell, ColumnMapping, IngestError, IngestMode,
    IngestReport, RawTable, MIN_COLUMNS,
};
pub use msg::Msg;
pub use record::{
    apply_transition, RecordSet, SiteId, SiteRecord, SiteStatus, UnknownStatus, NO_NOTES,
};
pub use select::{parse_tap_payload, select_by_query, select_by_tap, TapError};
pub use state::{AppState, IngestSummary, Notice, SessionPhase};
pub use update::{update, TAP_AGAIN_HINT};
pub use view_model::{
    AppViewModel, MapFraming, PinColor, PinView, SelectedSiteView, StatusCounts, DEFAULT_ZOOM,
    FOCUS_ZOOM,
};

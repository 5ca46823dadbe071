use crate::{BoundingBox, GeoPoint, IngestSummary, Notice, SessionPhase, SiteId, SiteStatus};

/// Zoom level for the whole record set.
pub const DEFAULT_ZOOM: u8 = 14;
/// Zoom level when a search match is focused.
pub const FOCUS_ZOOM: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinColor {
    Blue,
    Orange,
    Green,
    Red,
    /// Selected pin, regardless of status.
    Highlight,
}

impl PinColor {
    pub fn for_status(status: SiteStatus) -> Self {
        match status {
            SiteStatus::Pending => PinColor::Blue,
            SiteStatus::EnRoute => PinColor::Orange,
            SiteStatus::Completed => PinColor::Green,
            SiteStatus::NoAccess => PinColor::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PinColor::Blue => "blue",
            PinColor::Orange => "orange",
            PinColor::Green => "green",
            PinColor::Red => "red",
            PinColor::Highlight => "purple",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinView {
    pub id: SiteId,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: String,
    pub status: SiteStatus,
    pub color: PinColor,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSiteView {
    pub id: SiteId,
    pub status: SiteStatus,
    pub notes: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFraming {
    pub center: GeoPoint,
    pub zoom: u8,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub en_route: usize,
    pub completed: usize,
    pub no_access: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: SessionPhase,
    pub pins: Vec<PinView>,
    pub selected: Option<SelectedSiteView>,
    /// `None` until a record set is loaded.
    pub framing: Option<MapFraming>,
    pub counts: StatusCounts,
    pub query: String,
    pub notice: Option<Notice>,
    pub last_ingest: Option<IngestSummary>,
    pub dirty: bool,
}

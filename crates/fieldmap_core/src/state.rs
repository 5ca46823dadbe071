use crate::geo::{bounding_box, centroid};
use crate::ingest::IngestReport;
use crate::view_model::{
    AppViewModel, MapFraming, PinColor, PinView, SelectedSiteView, StatusCounts, DEFAULT_ZOOM,
    FOCUS_ZOOM,
};
use crate::{RecordSet, SiteId, SiteStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    AwaitingUpload,
    Loading,
    Mapping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Warning(text) | Notice::Error(text) => text,
        }
    }
}

/// What the last successful upload produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub record_count: usize,
    pub skipped_rows: usize,
    pub positional: bool,
}

/// Session state: the record set, the selection and what the UI should show.
///
/// The record set is owned here and mutated in place; effects get snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: SessionPhase,
    records: RecordSet,
    selection: Option<SiteId>,
    focus: Option<SiteId>,
    query: String,
    notice: Option<Notice>,
    last_ingest: Option<IngestSummary>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let pins = self
            .records
            .iter()
            .map(|record| {
                let selected = self.selection.as_deref() == Some(record.id.as_str());
                PinView {
                    id: record.id.clone(),
                    latitude: record.latitude,
                    longitude: record.longitude,
                    notes: record.notes.clone(),
                    status: record.status,
                    color: if selected {
                        PinColor::Highlight
                    } else {
                        PinColor::for_status(record.status)
                    },
                    selected,
                }
            })
            .collect();

        let selected = self
            .selection
            .as_deref()
            .and_then(|id| self.records.find(id))
            .map(|record| SelectedSiteView {
                id: record.id.clone(),
                status: record.status,
                notes: record.notes.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
            });

        AppViewModel {
            phase: self.phase,
            pins,
            selected,
            framing: self.framing(),
            counts: StatusCounts {
                pending: self.records.count_with(SiteStatus::Pending),
                en_route: self.records.count_with(SiteStatus::EnRoute),
                completed: self.records.count_with(SiteStatus::Completed),
                no_access: self.records.count_with(SiteStatus::NoAccess),
            },
            query: self.query.clone(),
            notice: self.notice.clone(),
            last_ingest: self.last_ingest,
            dirty: self.dirty,
        }
    }

    fn framing(&self) -> Option<MapFraming> {
        let bounds = bounding_box(&self.records).ok()?;
        let focused = self
            .focus
            .as_deref()
            .and_then(|id| self.records.find(id));
        let (center, zoom) = match focused {
            Some(record) => (
                crate::GeoPoint::new(record.latitude, record.longitude),
                FOCUS_ZOOM,
            ),
            None => (centroid(&self.records).ok()?, DEFAULT_ZOOM),
        };
        Some(MapFraming {
            center,
            zoom,
            bounds,
        })
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = SessionPhase::Loading;
        self.notice = None;
        self.mark_dirty();
    }

    /// Back to awaiting an upload; nothing from the failed attempt is kept.
    pub(crate) fn fail_loading(&mut self, reason: String) {
        self.phase = SessionPhase::AwaitingUpload;
        self.set_notice(Notice::Error(reason));
    }

    pub(crate) fn commit_ingest(&mut self, report: IngestReport) {
        self.last_ingest = Some(IngestSummary {
            record_count: report.records.len(),
            skipped_rows: report.invalid_coordinate_rows,
            positional: report.mapping.positional,
        });
        self.install_records(report.records);
    }

    pub(crate) fn restore(&mut self, records: RecordSet) {
        self.install_records(records);
    }

    fn install_records(&mut self, records: RecordSet) {
        self.records = records;
        self.phase = SessionPhase::Mapping;
        self.selection = None;
        self.focus = None;
        self.query.clear();
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, id: SiteId) {
        self.selection = Some(id);
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    pub(crate) fn focus_on(&mut self, id: SiteId) {
        self.focus = Some(id.clone());
        self.select(id);
    }

    pub(crate) fn clear_focus(&mut self) {
        if self.focus.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_status(&mut self, id: &str, status: SiteStatus) -> usize {
        let touched = self.records.apply_transition(id, status);
        if touched > 0 {
            self.mark_dirty();
        }
        touched
    }
}

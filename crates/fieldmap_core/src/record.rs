use std::fmt;
use std::str::FromStr;

/// Notes value used when a row carries no notes.
pub const NO_NOTES: &str = "No notes";

pub type SiteId = String;

/// Field-visit lifecycle of a site. Every status can move to every other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiteStatus {
    #[default]
    Pending,
    EnRoute,
    Completed,
    NoAccess,
}

impl SiteStatus {
    pub const ALL: [SiteStatus; 4] = [
        SiteStatus::Pending,
        SiteStatus::EnRoute,
        SiteStatus::Completed,
        SiteStatus::NoAccess,
    ];

    /// Label written to the work log and shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            SiteStatus::Pending => "Pending",
            SiteStatus::EnRoute => "En Route",
            SiteStatus::Completed => "Completed",
            SiteStatus::NoAccess => "No Access",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown site status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for SiteStatus {
    type Err = UnknownStatus;

    /// Accepts labels case-insensitively, ignoring spaces, dashes and underscores.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "pending" => Ok(SiteStatus::Pending),
            "enroute" => Ok(SiteStatus::EnRoute),
            "completed" | "complete" | "done" => Ok(SiteStatus::Completed),
            "noaccess" => Ok(SiteStatus::NoAccess),
            _ => Err(UnknownStatus(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub id: SiteId,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: String,
    pub status: SiteStatus,
}

impl SiteRecord {
    pub fn new(id: impl Into<SiteId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            notes: NO_NOTES.to_string(),
            status: SiteStatus::Pending,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_status(mut self, status: SiteStatus) -> Self {
        self.status = status;
        self
    }
}

/// Ordered collection of sites in source row order.
///
/// Ids may repeat; lookups return the first match and transitions touch every match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    records: Vec<SiteRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SiteRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SiteRecord] {
        &self.records
    }

    pub fn push(&mut self, record: SiteRecord) {
        self.records.push(record);
    }

    pub fn find(&self, id: &str) -> Option<&SiteRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn status_of(&self, id: &str) -> Option<SiteStatus> {
        self.find(id).map(|record| record.status)
    }

    /// Number of records currently in `status`.
    pub fn count_with(&self, status: SiteStatus) -> usize {
        self.records
            .iter()
            .filter(|record| record.status == status)
            .count()
    }

    /// Sets `status` on every record with this id and returns how many were touched.
    pub fn apply_transition(&mut self, id: &str, status: SiteStatus) -> usize {
        let mut touched = 0;
        for record in self.records.iter_mut().filter(|record| record.id == id) {
            record.status = status;
            touched += 1;
        }
        touched
    }
}

impl From<Vec<SiteRecord>> for RecordSet {
    fn from(records: Vec<SiteRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<SiteRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = SiteRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a SiteRecord;
    type IntoIter = std::slice::Iter<'a, SiteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Owned form of [`RecordSet::apply_transition`]: unknown ids leave the set unchanged.
pub fn apply_transition(mut records: RecordSet, id: &str, status: SiteStatus) -> RecordSet {
    records.apply_transition(id, status);
    records
}

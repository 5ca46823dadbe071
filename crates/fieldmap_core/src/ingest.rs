//! Record ingestion: turns a raw uploaded table into a canonical [`RecordSet`].
//!
//! Column roles are resolved from header names first and fall back to column
//! position when the headers are missing or ambiguous.

use crate::record::{RecordSet, SiteRecord, SiteStatus, NO_NOTES};

/// Minimum column count needed to derive id, latitude and longitude.
pub const MIN_COLUMNS: usize = 3;

/// One cell of an uploaded table as delivered by the table reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }

    /// Numeric coercion: only finite values count.
    pub fn as_coordinate(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => *n,
            Cell::Text(text) => text.trim().parse::<f64>().ok()?,
            Cell::Empty | Cell::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// String form used for ids and notes. Integral numbers drop the fraction.
    pub fn to_plain_string(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    // 2^53: beyond this an f64 no longer maps to a unique integer.
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < EXACT_INT_LIMIT {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Uploaded table: an optional header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Table without a header row; roles are assigned by position.
    pub fn headerless(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            headers: Vec::new(),
            rows,
        }
    }

    /// Widest of the header row and every data row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Whether a status column in the source is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestMode {
    /// Every record restarts at `Pending`.
    #[default]
    Fresh,
    /// Status labels found in the table are kept.
    Resume,
}

/// Column index for each record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub id: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub notes: Option<usize>,
    pub status: Option<usize>,
    pub positional: bool,
}

impl ColumnMapping {
    fn positional(column_count: usize) -> Self {
        Self {
            id: 0,
            latitude: 1,
            longitude: 2,
            notes: (column_count > 3).then_some(3),
            status: None,
            positional: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub records: RecordSet,
    pub mapping: ColumnMapping,
    pub empty_rows: usize,
    pub invalid_coordinate_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("table has {found} column(s); at least 3 are needed for id, latitude and longitude")]
    TooFewColumns { found: usize },
    #[error("no rows with valid coordinates")]
    NoValidRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Id,
    Latitude,
    Longitude,
    Notes,
    Status,
}

fn header_role(header: &str) -> Option<Role> {
    let name = header.trim().to_lowercase();
    match name.as_str() {
        "lat" | "latitude" | "y" => Some(Role::Latitude),
        "lon" | "long" | "longitude" | "x" => Some(Role::Longitude),
        "notes" | "note" | "comments" | "comment" => Some(Role::Notes),
        "status" => Some(Role::Status),
        _ if name.contains("ticket") || name.contains("number") => Some(Role::Id),
        _ => None,
    }
}

fn mapping_from_headers(headers: &[String]) -> Option<ColumnMapping> {
    let mut claims: [Vec<usize>; 5] = Default::default();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(role) = header_role(header) {
            claims[role as usize].push(idx);
        }
    }

    let exactly_one = |role: Role| match claims[role as usize].as_slice() {
        [idx] => Some(*idx),
        _ => None,
    };

    Some(ColumnMapping {
        id: exactly_one(Role::Id)?,
        latitude: exactly_one(Role::Latitude)?,
        longitude: exactly_one(Role::Longitude)?,
        notes: claims[Role::Notes as usize].first().copied(),
        status: claims[Role::Status as usize].first().copied(),
        positional: false,
    })
}

/// Resolve column roles: header names when unambiguous, otherwise position.
pub fn resolve_columns(table: &RawTable) -> ColumnMapping {
    mapping_from_headers(&table.headers)
        .unwrap_or_else(|| ColumnMapping::positional(table.column_count()))
}

/// Ingest a freshly uploaded table; every record starts at `Pending`.
pub fn ingest(table: &RawTable) -> Result<RecordSet, IngestError> {
    ingest_with_report(table, IngestMode::Fresh).map(|report| report.records)
}

pub fn ingest_with_report(table: &RawTable, mode: IngestMode) -> Result<IngestReport, IngestError> {
    let found = table.column_count();
    if found < MIN_COLUMNS {
        return Err(IngestError::TooFewColumns { found });
    }

    let mapping = resolve_columns(table);
    let mut records = RecordSet::new();
    let mut empty_rows = 0;
    let mut invalid_coordinate_rows = 0;

    for row in &table.rows {
        if row.iter().all(Cell::is_blank) {
            empty_rows += 1;
            continue;
        }
        let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY_CELL);

        let (Some(latitude), Some(longitude)) = (
            cell(mapping.latitude).as_coordinate(),
            cell(mapping.longitude).as_coordinate(),
        ) else {
            invalid_coordinate_rows += 1;
            continue;
        };

        let notes = mapping
            .notes
            .map(|idx| cell(idx).to_plain_string())
            .filter(|notes| !notes.is_empty())
            .unwrap_or_else(|| NO_NOTES.to_string());

        let status = match (mode, mapping.status) {
            (IngestMode::Resume, Some(idx)) => cell(idx)
                .to_plain_string()
                .parse::<SiteStatus>()
                .unwrap_or_default(),
            _ => SiteStatus::Pending,
        };

        records.push(
            SiteRecord::new(cell(mapping.id).to_plain_string(), latitude, longitude)
                .with_notes(notes)
                .with_status(status),
        );
    }

    if records.is_empty() {
        return Err(IngestError::NoValidRows);
    }

    Ok(IngestReport {
        records,
        mapping,
        empty_rows,
        invalid_coordinate_rows,
    })
}

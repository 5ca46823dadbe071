use crate::record::{RecordSet, SiteId};

/// Why a marker tap could not be resolved to a site. Never fatal: the caller keeps
/// the previous selection and lets the user tap again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TapError {
    #[error("malformed tap payload: {0:?}")]
    MalformedTapPayload(String),
    #[error("no site with id {0:?}")]
    UnknownSite(SiteId),
}

/// Extract the id from a marker label such as `"Ticket: 42"` or `"ID:42"`.
///
/// The id is everything after the first `:`, trimmed.
pub fn parse_tap_payload(payload: &str) -> Result<&str, TapError> {
    let (_, id) = payload
        .split_once(':')
        .ok_or_else(|| TapError::MalformedTapPayload(payload.to_string()))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(TapError::MalformedTapPayload(payload.to_string()));
    }
    Ok(id)
}

/// Resolve a marker tap to the id of a site in `records`.
pub fn select_by_tap(records: &RecordSet, payload: &str) -> Result<SiteId, TapError> {
    let id = parse_tap_payload(payload)?;
    if records.contains(id) {
        Ok(id.to_string())
    } else {
        Err(TapError::UnknownSite(id.to_string()))
    }
}

/// First site, in record order, whose id contains `query`.
///
/// A blank query means "no filter" and never matches.
pub fn select_by_query(records: &RecordSet, query: &str) -> Option<SiteId> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    records
        .iter()
        .find(|record| record.id.contains(query))
        .map(|record| record.id.clone())
}

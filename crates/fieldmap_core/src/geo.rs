//! Map framing reductions over a record set.

use crate::record::RecordSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Axis-aligned box: `south_west` holds the minima, `north_east` the maxima.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("record set is empty")]
    EmptyRecordSet,
}

/// Mean latitude and mean longitude, used for the default map view.
pub fn centroid(records: &RecordSet) -> Result<GeoPoint, GeoError> {
    if records.is_empty() {
        return Err(GeoError::EmptyRecordSet);
    }
    let (lat_sum, lon_sum) = records.iter().fold((0.0, 0.0), |(lat, lon), record| {
        (lat + record.latitude, lon + record.longitude)
    });
    let count = records.len() as f64;
    Ok(GeoPoint::new(lat_sum / count, lon_sum / count))
}

pub fn bounding_box(records: &RecordSet) -> Result<BoundingBox, GeoError> {
    let mut iter = records.iter();
    let first = iter.next().ok_or(GeoError::EmptyRecordSet)?;
    let start = BoundingBox {
        south_west: GeoPoint::new(first.latitude, first.longitude),
        north_east: GeoPoint::new(first.latitude, first.longitude),
    };
    Ok(iter.fold(start, |mut bounds, record| {
        bounds.south_west.latitude = bounds.south_west.latitude.min(record.latitude);
        bounds.south_west.longitude = bounds.south_west.longitude.min(record.longitude);
        bounds.north_east.latitude = bounds.north_east.latitude.max(record.latitude);
        bounds.north_east.longitude = bounds.north_east.longitude.max(record.longitude);
        bounds
    }))
}

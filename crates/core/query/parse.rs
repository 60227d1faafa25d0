//! Parsing of raw path parameters into query values.
//!
//! Every failure here is a client error; nothing in this module touches a
//! store.

use crate::error::{GeostackError, Result};
use bson::DateTime;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use geostack_types::geo::Polygon;

/// Date format of the `by-date-range` path segments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a 24 digit hex string into an ObjectId.
///
/// # Examples
///
/// ```
/// use geostack::query::parse::parse_object_id;
///
/// assert!(parse_object_id("5e2aec9e0bd1ad3f3ce7a1a4").is_ok());
/// assert!(parse_object_id("not-an-id").is_err());
/// ```
pub fn parse_object_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| GeostackError::InvalidIdentifier(raw.to_string()))
}

/// Parse a result amount. Amounts above `max` are rejected rather than
/// silently clamped.
pub fn parse_amount(raw: &str, max: u64) -> Result<u64> {
    let amount: u64 = raw
        .trim()
        .parse()
        .map_err(|_| GeostackError::InvalidAmount(raw.to_string()))?;

    if amount > max {
        return Err(GeostackError::AmountTooLarge {
            requested: amount,
            max,
        });
    }

    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
///
/// # Examples
///
/// ```
/// use geostack::query::parse::parse_date;
///
/// let date = parse_date("2020-01-15").unwrap();
/// assert_eq!(date.timestamp_millis(), 1_579_046_400_000);
/// assert!(parse_date("15-01-2020").is_err());
/// ```
pub fn parse_date(raw: &str) -> Result<DateTime> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| GeostackError::InvalidDate(raw.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| GeostackError::InvalidDate(raw.to_string()))?;
    Ok(DateTime::from_millis(midnight.and_utc().timestamp_millis()))
}

/// Parse a flat `lon,lat,lon,lat,...` list into a polygon ring.
///
/// Values are paired in input order. The ring must already be closed (first
/// pair equal to the last) and hold at least four pairs; it is never closed
/// on the caller's behalf. Odd value counts are rejected.
///
/// # Examples
///
/// ```
/// use geostack::query::parse::parse_ring;
///
/// let ring = parse_ring("5.0,52.0,6.0,52.0,6.0,53.0,5.0,52.0", 1000).unwrap();
/// assert_eq!(ring.ring_positions().len(), 4);
///
/// // Not closed
/// assert!(parse_ring("5.0,52.0,6.0,52.0,6.0,53.0,5.0,53.0", 1000).is_err());
/// ```
pub fn parse_ring(raw: &str, max_vertices: usize) -> Result<Polygon> {
    let values = raw
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(GeostackError::InvalidPolygon(format!(
                    "'{token}' is not a number"
                ))),
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        return Err(GeostackError::InvalidPolygon(format!(
            "expected longitude/latitude pairs, got {} values",
            values.len()
        )));
    }

    let ring: Vec<(f64, f64)> = values.chunks_exact(2).map(|c| (c[0], c[1])).collect();

    if ring.len() < 4 {
        return Err(GeostackError::InvalidPolygon(format!(
            "a closed ring needs at least 4 positions, got {}",
            ring.len()
        )));
    }

    if ring.len() > max_vertices {
        return Err(GeostackError::InvalidPolygon(format!(
            "{} positions exceed the maximum of {}",
            ring.len(),
            max_vertices
        )));
    }

    if ring.first() != ring.last() {
        return Err(GeostackError::InvalidPolygon(
            "ring is not closed: first and last positions differ".to_string(),
        ));
    }

    for &(lon, lat) in &ring {
        validate_position(lon, lat)?;
    }

    Ok(Polygon::from_ring(&ring))
}

/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
fn validate_position(lon: f64, lat: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeostackError::InvalidPolygon(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeostackError::InvalidPolygon(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

//! Wrapped geometric types from the `geo` crate.
//!
//! Stored documents keep their coordinates as GeoJSON points
//! (`{"type": "Point", "coordinates": [lon, lat]}`); queries work with the
//! [`Point`] and [`Polygon`] wrappers below.

use serde::{Deserialize, Serialize};

/// A geographic point with longitude/latitude coordinates.
///
/// # Examples
///
/// ```
/// use geostack_types::geo::Point;
///
/// let crane = Point::new(5.9178, 52.3612);
/// assert_eq!(crane.lon(), 5.9178);
/// assert_eq!(crane.lat(), 52.3612);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    inner: geo::Point<f64>,
}

impl Point {
    /// Create a new point from x (longitude) and y (latitude) coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            inner: geo::Point::new(x, y),
        }
    }

    /// Get the x coordinate (longitude).
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x()
    }

    /// Get the y coordinate (latitude).
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y()
    }

    /// Get the longitude (alias for x).
    #[inline]
    pub fn lon(&self) -> f64 {
        self.x()
    }

    /// Get the latitude (alias for y).
    #[inline]
    pub fn lat(&self) -> f64 {
        self.y()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(inner: geo::Point<f64>) -> Self {
        Self { inner }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x(), point.y())
    }
}

/// A polygon with a single exterior ring, as accepted by the polygon
/// containment queries.
///
/// The ring is kept exactly as supplied; callers are expected to close it
/// (first position equal to the last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    inner: geo::Polygon<f64>,
}

impl Polygon {
    /// Create a polygon from the positions of its exterior ring.
    ///
    /// # Examples
    ///
    /// ```
    /// use geostack_types::geo::{Point, Polygon};
    ///
    /// let veluwe = Polygon::from_ring(&[
    ///     (5.5, 52.0),
    ///     (6.2, 52.0),
    ///     (6.2, 52.4),
    ///     (5.5, 52.4),
    ///     (5.5, 52.0),
    /// ]);
    /// assert!(veluwe.contains(&Point::new(5.9, 52.2)));
    /// ```
    pub fn from_ring(ring: &[(f64, f64)]) -> Self {
        let coords: Vec<geo::Coord> = ring.iter().map(|&(x, y)| geo::Coord { x, y }).collect();
        Self {
            inner: geo::Polygon::new(geo::LineString::from(coords), Vec::new()),
        }
    }

    /// Get a reference to the exterior ring.
    #[inline]
    pub fn exterior(&self) -> &geo::LineString<f64> {
        self.inner.exterior()
    }

    /// Exterior ring positions as `[lon, lat]` pairs, in input order.
    pub fn ring_positions(&self) -> Vec<[f64; 2]> {
        self.exterior().coords().map(|c| [c.x, c.y]).collect()
    }

    /// Access the inner `geo::Polygon`.
    #[inline]
    pub fn inner(&self) -> &geo::Polygon<f64> {
        &self.inner
    }

    /// Axis-aligned bounding rectangle of the ring, `None` for an empty ring.
    pub fn bounding_rect(&self) -> Option<geo::Rect<f64>> {
        use geo::BoundingRect;
        self.inner.bounding_rect()
    }

    /// Check if a point lies strictly inside this polygon.
    ///
    /// Points on the boundary are not contained.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        use geo::Contains;
        self.inner.contains(&point.inner)
    }
}

impl From<geo::Polygon<f64>> for Polygon {
    fn from(inner: geo::Polygon<f64>) -> Self {
        Self { inner }
    }
}

/// GeoJSON geometry tag for [`GeoJsonPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointKind {
    #[default]
    Point,
}

/// A GeoJSON point as stored in the `geometry.coord` field of transmissions
/// and signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

impl GeoJsonPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [lon, lat],
        }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.coordinates[0], self.coordinates[1])
    }
}

impl From<Point> for GeoJsonPoint {
    fn from(point: Point) -> Self {
        Self::new(point.lon(), point.lat())
    }
}

/// Embedded position of a transmission or signal: the indexed point plus
/// altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub coord: GeoJsonPoint,
    pub alt: f64,
}

impl Geometry {
    pub fn new(lon: f64, lat: f64, alt: f64) -> Self {
        Self {
            coord: GeoJsonPoint::new(lon, lat),
            alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_ring(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ])
    }

    #[test]
    fn test_polygon_contains_interior_point() {
        assert!(square().contains(&Point::new(5.0, 5.0)));
        assert!(!square().contains(&Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_polygon_keeps_ring_order() {
        let positions = square().ring_positions();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[1], [10.0, 0.0]);
        assert_eq!(positions.first(), positions.last());
    }

    #[test]
    fn test_polygon_bounding_rect() {
        let rect = square().bounding_rect().unwrap();
        assert_eq!(rect.min().x, 0.0);
        assert_eq!(rect.max().y, 10.0);
    }

    #[test]
    fn test_geojson_point_serialization() {
        let point = GeoJsonPoint::new(5.9, 52.3);
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Point", "coordinates": [5.9, 52.3]})
        );
        assert_eq!(point.to_point(), Point::new(5.9, 52.3));
    }
}

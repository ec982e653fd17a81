use geo::{Area, Coord, LineString, Polygon, Relate};
use serde::{Deserialize, Serialize};

/// Outline of a single room, wrapping the raw coordinate list into a
/// polygon that supports boundary-contact queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPolygon {
    polygon: Polygon<f64>,
    point_count: usize,
}

impl RoomPolygon {
    /// Wrap a list of (x, y) corners. The ring is closed implicitly.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        let point_count = points.len();
        let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord { x, y }).collect();
        let polygon = Polygon::new(LineString::from(coords), vec![]);

        Self {
            polygon,
            point_count,
        }
    }

    /// An outline that cannot bound a room: fewer than 3 corners, or all
    /// corners collinear (zero enclosed area).
    pub fn is_degenerate(&self) -> bool {
        self.point_count < 3 || self.polygon.unsigned_area() == 0.0
    }

    /// Enclosed area via the shoelace formula.
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Boundary contact without interior overlap (DE-9IM "touches"):
    /// shared edges or shared corners count, overlapping interiors and
    /// disjoint outlines do not. Degenerate outlines report no contact.
    pub fn touches(&self, other: &RoomPolygon) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        self.polygon.relate(&other.polygon).is_touches()
    }
}

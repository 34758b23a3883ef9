//! Square candidate regions of the label search.

use geo::{coord, Coord};

use crate::geometry::GeometryQuery;

/// A square region of the plane with the signed distance of its center.
///
/// `max` is the best distance any point inside the square could reach:
/// distance to the boundary is 1-Lipschitz, and no point of the square is
/// further than the half-diagonal from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    center: Coord<f64>,
    half_size: f64,
    distance: f64,
    max: f64,
}

impl Cell {
    pub fn new<G: GeometryQuery + ?Sized>(x: f64, y: f64, half_size: f64, geometry: &G) -> Self {
        let center = coord! { x: x, y: y };
        let distance = geometry.signed_distance(center);
        Self {
            center,
            half_size,
            distance,
            max: distance + half_size * std::f64::consts::SQRT_2,
        }
    }

    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn half_size(&self) -> f64 {
        self.half_size
    }

    /// Signed distance from the center to the boundary
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Upper bound on the distance reachable inside the cell
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The four quadrants of this cell
    pub fn split<G: GeometryQuery + ?Sized>(&self, geometry: &G) -> [Cell; 4] {
        let h = self.half_size / 2.0;
        let Coord { x, y } = self.center;
        [
            Cell::new(x - h, y - h, h, geometry),
            Cell::new(x + h, y - h, h, geometry),
            Cell::new(x - h, y + h, h, geometry),
            Cell::new(x + h, y + h, h, geometry),
        ]
    }
}

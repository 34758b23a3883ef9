//! [`GeometryQuery`] for plain `geo` polygons.
//!
//! Distances scan every ring, so each probe costs O(edges). Use
//! [`super::IndexedGeometry`] for large boundaries.

use geo::{
    Area, BoundingRect, Centroid, Contains, Coord, Distance, Euclidean, HasDimensions,
    LineString, MultiPolygon, Point, Polygon, Rect, Validation,
};

use super::GeometryQuery;

/// Smallest distance from `at` to any ring of `polygon`
pub(super) fn ring_distance(polygon: &Polygon<f64>, at: &Point<f64>) -> f64 {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .filter(|ring| !ring.0.is_empty())
        .map(|ring: &LineString<f64>| Euclidean.distance(at, ring))
        .fold(f64::INFINITY, f64::min)
}

/// Apply the inside/outside sign to an unsigned boundary distance
pub(super) fn with_sign(distance: f64, inside: bool) -> f64 {
    if inside {
        distance
    } else {
        -distance
    }
}

impl GeometryQuery for Polygon<f64> {
    fn is_empty(&self) -> bool {
        HasDimensions::is_empty(self)
    }

    fn is_valid(&self) -> bool {
        Validation::is_valid(self)
    }

    fn area(&self) -> f64 {
        self.unsigned_area()
    }

    fn envelope(&self) -> Option<Rect<f64>> {
        self.bounding_rect()
    }

    fn centroid(&self) -> Option<Coord<f64>> {
        Centroid::centroid(self).map(|p| p.0)
    }

    fn signed_distance(&self, at: Coord<f64>) -> f64 {
        let point = Point::from(at);
        with_sign(ring_distance(self, &point), self.contains(&point))
    }
}

impl GeometryQuery for MultiPolygon<f64> {
    fn is_empty(&self) -> bool {
        self.0.iter().all(|p| HasDimensions::is_empty(p))
    }

    fn is_valid(&self) -> bool {
        Validation::is_valid(self)
    }

    fn area(&self) -> f64 {
        self.unsigned_area()
    }

    fn envelope(&self) -> Option<Rect<f64>> {
        self.bounding_rect()
    }

    fn centroid(&self) -> Option<Coord<f64>> {
        Centroid::centroid(self).map(|p| p.0)
    }

    fn signed_distance(&self, at: Coord<f64>) -> f64 {
        let point = Point::from(at);
        let distance = self
            .0
            .iter()
            .map(|p| ring_distance(p, &point))
            .fold(f64::INFINITY, f64::min);
        let inside = self.0.iter().any(|p| p.contains(&point));
        with_sign(distance, inside)
    }
}

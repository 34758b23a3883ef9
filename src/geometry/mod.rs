//! Geometry engines used by the label search.
//!
//! The search only needs a handful of queries on the input shape: validity,
//! area, envelope, centroid and a signed distance to the boundary. They are
//! collected in [`GeometryQuery`] so the search does not care whether the
//! distance comes from a scan over every edge or from a spatial index.

mod engine;
mod index;

use geo::{Coord, Geometry, MultiPolygon, Polygon, Rect};

use crate::error::{LabelError, Result};

pub use index::IndexedGeometry;

/// Queries the label search runs against a polygonal geometry.
pub trait GeometryQuery {
    fn is_empty(&self) -> bool;

    fn is_valid(&self) -> bool;

    /// Unsigned enclosed area
    fn area(&self) -> f64;

    /// Bounding rectangle, `None` when there is nothing to bound
    fn envelope(&self) -> Option<Rect<f64>>;

    /// Area-weighted centroid. May lie outside the geometry.
    fn centroid(&self) -> Option<Coord<f64>>;

    /// Distance from `at` to the nearest boundary edge: positive strictly
    /// inside, negative outside or inside a hole, zero on the boundary.
    ///
    /// Must be 1-Lipschitz, the cell upper bound relies on it.
    fn signed_distance(&self, at: Coord<f64>) -> f64;
}

/// A polygonal geometry accepted by the labeller.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl LabelGeometry {
    /// View the geometry as a multipolygon
    pub fn into_multi_polygon(self) -> MultiPolygon<f64> {
        match self {
            LabelGeometry::Polygon(p) => MultiPolygon::new(vec![p]),
            LabelGeometry::MultiPolygon(mp) => mp,
        }
    }

    fn query(&self) -> &dyn GeometryQuery {
        match self {
            LabelGeometry::Polygon(p) => p,
            LabelGeometry::MultiPolygon(mp) => mp,
        }
    }
}

impl TryFrom<Geometry<f64>> for LabelGeometry {
    type Error = LabelError;

    fn try_from(geometry: Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::Polygon(p) => Ok(LabelGeometry::Polygon(p)),
            Geometry::MultiPolygon(mp) => Ok(LabelGeometry::MultiPolygon(mp)),
            Geometry::Rect(r) => Ok(LabelGeometry::Polygon(r.to_polygon())),
            Geometry::Triangle(t) => Ok(LabelGeometry::Polygon(t.to_polygon())),
            Geometry::Point(_) => Err(LabelError::UnsupportedGeometry("Point")),
            Geometry::Line(_) => Err(LabelError::UnsupportedGeometry("Line")),
            Geometry::LineString(_) => Err(LabelError::UnsupportedGeometry("LineString")),
            Geometry::MultiPoint(_) => Err(LabelError::UnsupportedGeometry("MultiPoint")),
            Geometry::MultiLineString(_) => {
                Err(LabelError::UnsupportedGeometry("MultiLineString"))
            }
            Geometry::GeometryCollection(_) => {
                Err(LabelError::UnsupportedGeometry("GeometryCollection"))
            }
        }
    }
}

impl From<Polygon<f64>> for LabelGeometry {
    fn from(polygon: Polygon<f64>) -> Self {
        LabelGeometry::Polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for LabelGeometry {
    fn from(multi: MultiPolygon<f64>) -> Self {
        LabelGeometry::MultiPolygon(multi)
    }
}

impl GeometryQuery for LabelGeometry {
    fn is_empty(&self) -> bool {
        self.query().is_empty()
    }

    fn is_valid(&self) -> bool {
        self.query().is_valid()
    }

    fn area(&self) -> f64 {
        self.query().area()
    }

    fn envelope(&self) -> Option<Rect<f64>> {
        self.query().envelope()
    }

    fn centroid(&self) -> Option<Coord<f64>> {
        self.query().centroid()
    }

    fn signed_distance(&self, at: Coord<f64>) -> f64 {
        self.query().signed_distance(at)
    }
}

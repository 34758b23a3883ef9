//! Spatial index over boundary segments for fast distance probes.

use geo::{Contains, Coord, MultiPolygon, Point, Polygon, Rect};
use rstar::primitives::Line;
use rstar::{PointDistance, RTree};
use tracing::debug;

use super::GeometryQuery;

/// A multipolygon with every ring segment loaded into an R-tree.
///
/// Signed distance becomes a nearest-segment query instead of a scan over
/// all edges. Everything else delegates to the wrapped geometry.
pub struct IndexedGeometry {
    geometry: MultiPolygon<f64>,
    segments: RTree<Line<[f64; 2]>>,
}

impl IndexedGeometry {
    /// Build the segment index for a multipolygon
    pub fn new(geometry: MultiPolygon<f64>) -> Self {
        let segments: Vec<Line<[f64; 2]>> = geometry
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .flat_map(|ring| ring.lines())
            .map(|line| Line::new([line.start.x, line.start.y], [line.end.x, line.end.y]))
            .collect();

        let segments = RTree::bulk_load(segments);
        debug!("Indexed {} boundary segments", segments.size());

        Self { geometry, segments }
    }

    /// The wrapped geometry
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Number of indexed boundary segments
    pub fn segment_count(&self) -> usize {
        self.segments.size()
    }
}

impl From<Polygon<f64>> for IndexedGeometry {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::new(MultiPolygon::new(vec![polygon]))
    }
}

impl From<MultiPolygon<f64>> for IndexedGeometry {
    fn from(geometry: MultiPolygon<f64>) -> Self {
        Self::new(geometry)
    }
}

impl GeometryQuery for IndexedGeometry {
    fn is_empty(&self) -> bool {
        GeometryQuery::is_empty(&self.geometry)
    }

    fn is_valid(&self) -> bool {
        GeometryQuery::is_valid(&self.geometry)
    }

    fn area(&self) -> f64 {
        GeometryQuery::area(&self.geometry)
    }

    fn envelope(&self) -> Option<Rect<f64>> {
        GeometryQuery::envelope(&self.geometry)
    }

    fn centroid(&self) -> Option<Coord<f64>> {
        GeometryQuery::centroid(&self.geometry)
    }

    fn signed_distance(&self, at: Coord<f64>) -> f64 {
        let query = [at.x, at.y];
        let distance = match self.segments.nearest_neighbor(&query) {
            Some(segment) => segment.distance_2(&query).sqrt(),
            None => f64::INFINITY,
        };

        let point = Point::from(at);
        let inside = self.geometry.0.iter().any(|p| p.contains(&point));
        super::engine::with_sign(distance, inside)
    }
}

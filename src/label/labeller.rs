use geo::{Point, Rect};
use tracing::{debug, trace};

use super::{Cell, Frontier};
use crate::error::{InvalidReason, LabelError, Result};
use crate::geometry::GeometryQuery;

/// Outcome of a label search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// Best point found
    pub point: Point<f64>,
    /// Signed distance from `point` to the boundary
    pub distance: f64,
    /// Number of cells evaluated, centroid seed included
    pub probes: usize,
    /// The probe budget ran out before the search converged
    pub truncated: bool,
}

/// Best-first branch-and-bound search for the pole of inaccessibility.
///
/// The envelope is tiled with square cells, which are refined in order of
/// their upper bound until no cell can beat the best known distance by more
/// than `precision`.
#[derive(Debug, Clone, Copy)]
pub struct Labeller {
    precision: f64,
    max_probes: Option<usize>,
}

impl Labeller {
    pub fn new(precision: f64) -> Self {
        Self {
            precision,
            max_probes: None,
        }
    }

    /// Stop splitting cells once `max_probes` cells have been evaluated.
    /// The initial grid is always evaluated in full.
    pub fn with_max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = Some(max_probes);
        self
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Reject inputs the search can not handle, before any work is done
    fn check<G: GeometryQuery + ?Sized>(&self, geometry: &G) -> Result<Rect<f64>> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(LabelError::InvalidPrecision(self.precision));
        }
        if geometry.is_empty() {
            return Err(LabelError::InvalidGeometry(InvalidReason::Empty));
        }
        if !(geometry.area() > 0.0) {
            return Err(LabelError::InvalidGeometry(InvalidReason::NonPositiveArea));
        }
        if !geometry.is_valid() {
            return Err(LabelError::InvalidGeometry(InvalidReason::Invalid));
        }

        geometry
            .envelope()
            .filter(|env| {
                let (min, max) = (env.min(), env.max());
                min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()
            })
            .ok_or(LabelError::InvalidGeometry(InvalidReason::Empty))
    }

    /// Find the point of `geometry` furthest from its boundary, to within
    /// the configured precision
    pub fn label<G: GeometryQuery + ?Sized>(&self, geometry: &G) -> Result<Label> {
        let envelope = self.check(geometry)?;

        let (min_x, min_y) = envelope.min().x_y();
        let (max_x, max_y) = envelope.max().x_y();
        let cell_size = envelope.width().min(envelope.height());
        let h = cell_size / 2.0;

        let mut frontier = Frontier::new();

        // Cover the envelope with the initial grid. A step that no longer
        // moves the coordinate ends the row.
        if cell_size > 0.0 {
            let mut x = min_x;
            while x < max_x {
                let mut y = min_y;
                while y < max_y {
                    frontier.push(Cell::new(x + h, y + h, h, geometry));
                    if y + cell_size == y {
                        break;
                    }
                    y += cell_size;
                }
                if x + cell_size == x {
                    break;
                }
                x += cell_size;
            }
        } else {
            frontier.push(Cell::new(min_x, min_y, 0.0, geometry));
        }

        // Centroid as the first best guess
        let seed = geometry.centroid().unwrap_or_else(|| envelope.center());
        let mut best = Cell::new(seed.x, seed.y, 0.0, geometry);
        let mut probes = frontier.len() + 1;
        let mut truncated = false;

        trace!(
            "Seeded {} grid cells of size {}, centroid distance {}",
            frontier.len(),
            cell_size,
            best.distance()
        );

        while let Some(cell) = frontier.pop() {
            if cell.distance() > best.distance() {
                best = cell;
                trace!(
                    "Found best {:.4} after {} probes",
                    best.distance(),
                    probes
                );
            }

            // No chance of a better solution inside this cell
            if cell.max() - best.distance() <= self.precision {
                continue;
            }

            if let Some(limit) = self.max_probes {
                if probes + 4 > limit {
                    truncated = true;
                    break;
                }
            }

            for child in cell.split(geometry) {
                frontier.push(child);
            }
            probes += 4;
        }

        // Cells left behind by the budget were already evaluated
        if truncated {
            while let Some(cell) = frontier.pop() {
                if cell.distance() > best.distance() {
                    best = cell;
                }
            }
        }

        debug!(
            "Label at ({}, {}) with distance {} after {} probes{}",
            best.center().x,
            best.center().y,
            best.distance(),
            probes,
            if truncated { " (truncated)" } else { "" }
        );

        Ok(Label {
            point: Point::from(best.center()),
            distance: best.distance(),
            probes,
            truncated,
        })
    }
}

/// Find the pole of inaccessibility of `geometry` to within `precision`
pub fn compute<G: GeometryQuery + ?Sized>(geometry: &G, precision: f64) -> Result<Point<f64>> {
    Labeller::new(precision).label(geometry).map(|label| label.point)
}

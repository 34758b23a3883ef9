//! Boundary files: named regions to be labelled.
//!
//! Boundaries are stored as loose ring fragments, the way airspace and admin
//! boundary exports usually come. Loading assembles them into multipolygons
//! and folds extension boundaries into their parents.

mod assemble;
mod extension;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geo::{BoundingRect, Coord, MultiPolygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use assemble::{assemble_polygons, assemble_rings};
pub use extension::merge_extensions;

/// A boundary as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the boundary this one extends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_of: Option<String>,
    /// Ring fragments as `[x, y]` pairs
    pub rings: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryFile {
    pub boundaries: Vec<BoundaryRecord>,
}

/// A boundary with its geometry resolved
#[derive(Debug, Clone)]
pub struct Boundary {
    pub id: String,
    pub name: Option<String>,
    pub extension_of: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl Boundary {
    /// Assemble the record's ring fragments. `None` when no closed ring
    /// could be built.
    pub fn from_record(record: BoundaryRecord) -> Option<Self> {
        let fragments: Vec<Vec<Coord<f64>>> = record
            .rings
            .iter()
            .map(|ring| ring.iter().map(|&[x, y]| Coord { x, y }).collect())
            .collect();

        let geometry = assemble_polygons(assemble_rings(fragments));
        if geometry.0.is_empty() {
            return None;
        }

        Some(Self {
            id: record.id,
            name: record.name,
            extension_of: record.extension_of,
            geometry,
        })
    }

    /// Get the bounding box of this boundary
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Read boundary records from a JSON file
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> Result<Vec<BoundaryRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read boundary file {}", path.display()))?;
    let file: BoundaryFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse boundary file {}", path.display()))?;
    Ok(file.boundaries)
}

/// Resolve geometries and merge extensions
pub fn resolve_boundaries(records: Vec<BoundaryRecord>) -> Vec<Boundary> {
    let total = records.len();
    let mut boundaries = Vec::with_capacity(total);

    for record in records {
        let id = record.id.clone();
        match Boundary::from_record(record) {
            Some(boundary) => boundaries.push(boundary),
            None => debug!("Could not resolve geometry for boundary {}", id),
        }
    }

    let boundaries = merge_extensions(boundaries);
    info!(
        "Resolved {} boundaries from {} records",
        boundaries.len(),
        total
    );
    boundaries
}

/// Load a boundary file and resolve every boundary in it
pub fn read_boundaries<P: AsRef<Path>>(path: P) -> Result<Vec<Boundary>> {
    Ok(resolve_boundaries(load_boundaries(path)?))
}

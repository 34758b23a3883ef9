//! Label records written by the batch labeller.

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::label::Label;

/// Bounding box envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Envelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        }
    }
}

/// Where to put the label of one boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Label anchor
    pub x: f64,
    pub y: f64,

    /// Distance from the anchor to the nearest boundary edge
    pub distance: f64,

    /// Cells evaluated by the search
    pub probes: usize,

    /// Search stopped on the probe budget
    #[serde(default)]
    pub truncated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Envelope>,
}

impl LabelRecord {
    pub fn new(boundary: &Boundary, label: &Label) -> Self {
        Self {
            id: boundary.id.clone(),
            name: boundary.name.clone(),
            x: label.point.x(),
            y: label.point.y(),
            distance: label.distance,
            probes: label.probes,
            truncated: label.truncated,
            bbox: boundary
                .bbox()
                .map(|(min_x, min_y, max_x, max_y)| Envelope::new(min_x, min_y, max_x, max_y)),
        }
    }
}

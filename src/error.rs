//! Error types for label placement.

use thiserror::Error;

/// Why a geometry was rejected before the search started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No rings, or no finite envelope
    Empty,
    /// Zero (or negative) enclosed area
    NonPositiveArea,
    /// Self-intersections, unclosed rings, holes outside their shell, ...
    Invalid,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::Empty => write!(f, "can not label empty geometries"),
            InvalidReason::NonPositiveArea => {
                write!(f, "can not label geometries without positive area")
            }
            InvalidReason::Invalid => write!(f, "can not label invalid geometries"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(InvalidReason),

    #[error("precision must be a positive finite number, got {0}")]
    InvalidPrecision(f64),

    #[error("input must be a Polygon or MultiPolygon, got {0}")]
    UnsupportedGeometry(&'static str),
}

pub type Result<T> = std::result::Result<T, LabelError>;

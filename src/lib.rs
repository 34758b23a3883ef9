//! Polelabel - label placement for polygons
//!
//! Finds the pole of inaccessibility (the interior point furthest from the
//! boundary) of polygons and multipolygons, for anchoring region labels.
//! This library provides the search and the boundary loading used by the
//! `polelabel` batch binary.

pub mod boundary;
pub mod error;
pub mod geometry;
pub mod label;
pub mod models;

pub use error::{InvalidReason, LabelError};
pub use geometry::{GeometryQuery, IndexedGeometry, LabelGeometry};
pub use label::{compute, Label, Labeller};

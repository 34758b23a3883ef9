//! Label placement by pole of inaccessibility.
//!
//! Finds the interior point of a polygon furthest from its boundary using a
//! best-first search over a quadtree of square cells.

mod cell;
mod frontier;
mod labeller;

pub use cell::Cell;
pub use frontier::Frontier;
pub use labeller::{compute, Label, Labeller};

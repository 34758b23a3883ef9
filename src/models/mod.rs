//! Output data models.

pub mod label;

pub use label::{Envelope, LabelRecord};

//! # Models Module
//!
//! Immutable data carried through the synthesis and analysis pipeline.
//!
//! - [`parameters`] - Material, measurement and force-volume inputs, validated on use
//! - [`curve`] - Force-distance curves, borrowed curve segments and force volumes
//! - [`series`] - Per-sample parameter estimates recovered from curve segments

pub mod curve;
pub mod parameters;
pub mod series;

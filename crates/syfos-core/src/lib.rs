//! # SyFoS Core Library
//!
//! Synthesis of atomic-force-microscope force-distance curves from material and
//! measurement parameters, and recovery of those parameters from curve data.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MaterialParameters`, `Curve`,
//!   `ForceVolume`), the pure physics of the probe-sample interaction (van der Waals
//!   approach, snap-in, Hertzian contact) and CSV I/O.
//!
//! - **[`engine`]: The Logic Core.** The three-regime simulation state machine, the
//!   force-volume synthesizer with seeded, scheduling-independent replica noise, the
//!   curve segmenter and the per-sample parameter extractor.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built from the two layers
//!   below: synthesizing a force volume from a configuration, and analyzing a curve
//!   against the parameters it is supposed to reflect.

pub mod core;
pub mod engine;
pub mod workflows;

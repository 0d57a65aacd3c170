//! # Core Module
//!
//! Stateless building blocks of SyFoS: parameter and curve models, the pure physics of
//! the probe-sample interaction, and CSV I/O for force volumes and analysis results.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Material, measurement and force-volume parameters; curves
//! - **Physics** ([`physics`]) - Composite constants, regime step functions, cubic contact solver
//! - **File I/O** ([`io`]) - Reading and writing curves and parameter series as CSV
//!
//! ## Scientific Foundation
//!
//! - **Hamaker theory** for the sphere-plane van der Waals attraction during approach
//! - **Hertzian contact mechanics** for the elastic indentation of a spherical tip
//! - **Combining rules** for the effective Hamaker constant and reduced modulus of two bodies

pub mod io;
pub mod models;
pub mod physics;

//! # Physics Module
//!
//! Pure functions describing the probe-sample interaction.
//!
//! - [`composite`] - Effective Hamaker constant, reduced modulus and jump-to-contact
//! - [`regimes`] - Per-sample deflection of the approach, attraction and contact regimes
//!   and their continuation predicates
//! - [`contact`] - Closed-form solution of the Hertzian contact cubic

pub mod composite;
pub mod contact;
pub mod regimes;

//! # Workflows Module
//!
//! High-level entry points of SyFoS. Each workflow ties the [`crate::engine`] and
//! [`crate::core`] layers together into one complete procedure with progress reporting
//! and structured logging.
//!
//! ## Architecture
//!
//! - **Synthesis Workflow** ([`synthesize`]) - Ideal curve simulation followed by
//!   force-volume synthesis, returning the volume with its metadata and noise seed.
//! - **Analysis Workflow** ([`analyze`]) - Segmentation and parameter extraction of a
//!   single curve, summarized against the known generating parameters.

pub mod analyze;
pub mod synthesize;

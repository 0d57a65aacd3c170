//! # Engine Module
//!
//! This module implements the algorithms of SyFoS: simulation of ideal force-distance
//! curves, synthesis of noisy force volumes and the inverse analysis that recovers
//! physical parameters from curve data.
//!
//! ## Overview
//!
//! The engine takes validated parameter structs from [`crate::core`] and turns them into
//! curves, or takes curves and turns them back into per-sample parameter estimates. Every
//! operation is a pure computation over its inputs; the only randomness is the replica
//! noise, which is driven by an explicit seed.
//!
//! ## Architecture
//!
//! - **Simulation** ([`simulation`]) - Three-regime state machine producing the ideal curve
//! - **Synthesis** ([`synthesis`]) - Offsetting and noisy replication into a force volume
//! - **Segmentation** ([`segmentation`]) - Location of the approach and contact boundaries
//! - **Extraction** ([`extraction`]) - Per-sample inversion of the approach and contact laws
//! - **Configuration** ([`config`]) - Builder for complete synthesis settings
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Key Capabilities
//!
//! - **Closed-form contact mechanics** via a complex-arithmetic cubic solver
//! - **Bounded simulation** that reports unreachable regimes instead of looping
//! - **Parallel replica generation** with scheduling-independent noise streams
//! - **Self-consistency checks** of synthetic curves against their generating parameters

pub mod config;
pub mod error;
pub mod extraction;
pub mod progress;
pub mod segmentation;
pub mod simulation;
pub mod synthesis;

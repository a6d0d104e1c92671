//! # Workflows Module
//!
//! High-level entry points orchestrating the complete detection pipeline.
//!
//! ## Overview
//!
//! Workflows tie the engine stages together: base classification, per-residue
//! reference-frame fitting, pair validation, and mutual-best-match selection.
//! Each workflow validates its configuration up front and runs to completion
//! synchronously; there is no streaming or incremental interface.
//!
//! ## Architecture
//!
//! - **Detection Workflow** ([`detect`]) - Full base-pair detection over one
//!   structure, from raw atoms to the selected pair set.

pub mod detect;

//! # Engine Module
//!
//! The detection algorithms: reference-frame fitting, hydrogen-bond slot
//! assignment, pair validation, and mutual-best-match selection.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Geometric thresholds and compatibility
//!   switches, validated before any structure is processed
//! - **Frame Fitting** ([`frame`]) - Ring-atom matching and least-squares
//!   superposition onto standard-base templates, with the two-try fallback
//! - **Hydrogen Bonds** ([`hbond`]) - Donor/acceptor slot prediction and greedy
//!   slot assignment under capacity and bifurcation constraints
//! - **Pairing** ([`pairing`]) - Geometric validation, legacy-compatible quality
//!   scoring, and the greedy mutual-best-match selection sweep
//! - **Error Handling** ([`error`]) - Engine-level error types
//!
//! The engine is single-threaded and synchronous; with the `parallel` feature
//! the independent per-residue frame fits run on a rayon pool, but selection
//! always proceeds sequentially in canonical residue order.

pub mod config;
pub mod error;
pub mod frame;
pub mod hbond;
pub mod pairing;

//! # Core Module
//!
//! Fundamental building blocks for base-pair detection: the molecular data model,
//! the compiled-in chemical knowledge tables, and pure geometry utilities.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Arena-owned structures, residues,
//!   atoms, reference frames, and base-pair records with stable file-order ordinals
//! - **Chemical Knowledge** ([`tables`]) - Static registries for base classification,
//!   ring-atom names, standard-frame templates, connectivity, and hydrogen-bond
//!   donor/acceptor capacities
//! - **Geometry** ([`utils`]) - Plane projections, axis rotations, and the polygon
//!   overlap machinery shared by the engine

pub mod models;
pub mod tables;
pub mod utils;

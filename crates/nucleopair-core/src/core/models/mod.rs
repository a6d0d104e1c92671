//! # Core Models Module
//!
//! Data structures representing a nucleic acid structure and the products of
//! base-pair detection.
//!
//! ## Key Components
//!
//! - [`ids`] - Ordinal index types for atoms and residues (original file order)
//! - [`atom`] - Individual atom representation with name and coordinates
//! - [`residue`] - Residue identity, base classification, and atom membership
//! - [`structure`] - The arena owning all atoms and residues of one structure
//! - [`frame`] - Per-base reference frames (orthonormal rotation + origin)
//! - [`pair`] - Accepted base pairs and their hydrogen bonds
//!
//! Residues and atoms live in flat vectors owned by the [`structure::Structure`];
//! all cross-references use ordinal indices rather than pointers. The ordinal
//! order is the parser's line order and drives every deterministic iteration in
//! the engine.

pub mod atom;
pub mod frame;
pub mod ids;
pub mod pair;
pub mod residue;
pub mod structure;

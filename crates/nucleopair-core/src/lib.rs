//! # Nucleopair Core Library
//!
//! A library for detecting base pairs in 3D nucleic acid structures, reproducing
//! the behavior of the classic reference-frame based analysis pipeline.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Structure`,
//!   `Residue`, `ReferenceFrame`, `BasePair`), compiled-in chemical knowledge
//!   (ring-atom templates, connectivity and donor/acceptor capacity tables), and
//!   pure geometry utilities.
//!
//! - **[`engine`]: The Logic Core.** Implements the detection algorithms:
//!   ring-atom matching and least-squares reference-frame fitting, hydrogen-bond
//!   slot prediction and greedy slot assignment, geometric pair validation with
//!   legacy-compatible quality scoring, and mutual-best-match pair selection.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It
//!   ties the `engine` and `core` together to run the full detection pipeline
//!   (frame assignment, validation, selection) over a parsed structure.
//!
//! Structure parsing and output serialization are deliberately out of scope; the
//! library consumes an in-memory [`core::models::structure::Structure`] whose
//! residues and atoms carry stable ordinals in original file order, and returns
//! plain [`core::models::pair::BasePair`] records.

pub mod core;
pub mod engine;
pub mod workflows;

//! # Chemical Knowledge Tables
//!
//! Immutable, compiled-in lookup tables: base-name registries, ring-atom name
//! sets, standard-reference-frame template coordinates, per-base connectivity,
//! and hydrogen-bond donor/acceptor capacities. All tables are static data with
//! no mutation after load and are safe under concurrent read-only access.

pub mod bases;
pub mod hbond;

//! Reference-frame computation: ring-atom matching against standard-base
//! templates ([`matcher`]), least-squares rigid superposition ([`fitter`]),
//! and the two-try per-residue assignment pass ([`assign`]).

pub mod assign;
pub mod fitter;
pub mod matcher;

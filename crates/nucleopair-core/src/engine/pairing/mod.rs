//! Pair validation and selection: the six-parameter hinge decomposition
//! ([`params`]), geometric gating with legacy-compatible quality scoring
//! ([`validator`]), and the greedy mutual-best-match sweep ([`selector`]).

pub mod params;
pub mod selector;
pub mod validator;

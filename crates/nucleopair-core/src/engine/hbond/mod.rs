//! Hydrogen-bond prediction between candidate partners: per-atom donor and
//! lone-pair slot geometry ([`slots`]) and the greedy assignment of contacts
//! to slots ([`optimizer`]). Slot state lives only for the duration of one
//! pair evaluation.

pub mod optimizer;
pub mod slots;

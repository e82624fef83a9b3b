//! Action restrictions for before-filters.
//!
//! A [`Restriction`] decides whether a filter runs for a given action, using
//! the usual only/except semantics: an empty allow-list matches every action,
//! and the deny-list always wins.

mod restriction;

pub use restriction::{Decision, Restriction};

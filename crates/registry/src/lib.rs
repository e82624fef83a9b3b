//! Per-request registry of declared capability paths.
//!
//! A controller declares which external APIs a request needs (for example
//! `google.maps` or `yui.slider`). Those declarations land in a
//! [`CapabilityRegistry`], a tree of nested names owned by a single request.
//! Views and handlers then ask the registry whether a path was declared.
//!
//! # Core Concepts
//!
//! ## CapabilityPath
//!
//! A [`CapabilityPath`] is an ordered, non-empty list of [`Name`]s. Order
//! defines nesting: `[google, maps]` puts `maps` beneath `google`.
//!
//! ## CapabilityRegistry
//!
//! The registry only grows. Declaring a path upserts every segment, so
//! declaring the same path twice changes nothing, and overlapping paths merge.
//! Queries never fail: a missing name, or a [`Node::Leaf`] seeded from
//! foreign data, simply answers `false`.
//!
//! # Example
//!
//! ```
//! use registry::{CapabilityPath, CapabilityRegistry};
//!
//! let mut registry = CapabilityRegistry::new();
//! registry.declare(&CapabilityPath::new(["google", "maps"])?);
//!
//! assert!(registry.has_capability(&["google"]));
//! assert!(registry.has_capability(&["google", "maps"]));
//! assert!(!registry.has_capability(&["google", "visualization"]));
//! assert!(!registry.has_capability(&["yui"]));
//! # Ok::<(), registry::Error>(())
//! ```

mod error;
mod node;
mod path;

pub use error::{Error, Result};
pub use node::{CapabilityRegistry, Node};
pub use path::{CapabilityPath, Name};

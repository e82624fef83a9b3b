//! Controller-side API declarations.
//!
//! A [`ControllerDef`] collects, at definition time, the capability paths its
//! requests need (`declare`). Each declaration becomes a before-filter; when a
//! request is dispatched the filters that apply to the action upsert their
//! paths into the request's registry before the handler runs. Handlers and
//! views then ask [`RequestContext::has_capability`].
//!
//! # Example
//!
//! ```
//! use controller::{ControllerDef, Outcome, Restriction};
//!
//! # fn example() -> controller::Result<()> {
//! let mut maps = ControllerDef::new("maps");
//! maps.declare(["google", "maps"], Restriction::all())?;
//! maps.declare(["yui", "slider"], Restriction::only(["edit"]))?;
//!
//! let dispatch = maps.dispatch("show", |ctx| ctx.has_capability(&["google", "maps"]));
//! assert_eq!(dispatch.outcome, Outcome::Completed(true));
//! assert!(!dispatch.context.has_capability(&["yui"]));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod controller;
mod error;
pub mod helpers;
pub mod hooks;
mod request;

pub use controller::{ControllerDef, Declaration, Dispatch, Outcome};
pub use error::{Error, Result};
pub use helpers::{HelperTable, ViewHelpers};
pub use hooks::{ChainResult, HookOutcome};
pub use request::{RequestContext, RequestId};

pub use filter::Restriction;
pub use registry::{CapabilityPath, CapabilityRegistry};

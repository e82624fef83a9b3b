//! Controller definitions and request dispatch.

use std::sync::Arc;

use filter::Restriction;
use registry::CapabilityPath;
use tracing::debug;

use crate::hooks::{ChainResult, FilterChain, HookOutcome};
use crate::{RequestContext, Result};

/// A capability path a controller requires, and for which actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub path: CapabilityPath,
    pub restriction: Restriction,
}

/// How a dispatched request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Every applicable filter ran and the handler returned.
    Completed(T),
    /// A filter halted the chain; the handler never ran.
    Halted { filter: String },
}

/// A dispatched request: its outcome plus the context, so rendering can
/// keep querying it.
#[derive(Debug)]
pub struct Dispatch<T> {
    pub context: RequestContext,
    pub outcome: Outcome<T>,
}

/// Definition-time configuration of a controller.
///
/// Built once and reused for every request. Holds the before-filter chain
/// and the capability declarations that feed it.
#[derive(Debug, Clone)]
pub struct ControllerDef {
    name: String,
    chain: FilterChain,
    declarations: Vec<Declaration>,
}

impl ControllerDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain: FilterChain::new(),
            declarations: Vec::new(),
        }
    }

    /// Start a controller from a copy of `parent`'s filters and declarations.
    ///
    /// Filters added to the child afterwards run after the inherited ones and
    /// do not affect the parent.
    pub fn inherit(name: impl Into<String>, parent: &ControllerDef) -> Self {
        Self {
            name: name.into(),
            chain: parent.chain.clone(),
            declarations: parent.declarations.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Register a before-filter.
    pub fn before<F>(
        &mut self,
        name: impl Into<String>,
        restriction: Restriction,
        hook: F,
    ) -> &mut Self
    where
        F: Fn(&mut RequestContext) -> HookOutcome + Send + Sync + 'static,
    {
        self.chain.push(name, restriction, Arc::new(hook));
        self
    }

    /// Declare that requests to this controller require the API at `names`.
    ///
    /// Fails if `names` is empty or contains a blank name.
    pub fn declare<I, S>(&mut self, names: I, restriction: Restriction) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = CapabilityPath::new(names)?;
        Ok(self.declare_path(path, restriction))
    }

    /// Typed variant of [`declare`](Self::declare).
    pub fn declare_path(&mut self, path: CapabilityPath, restriction: Restriction) -> &mut Self {
        let hook_path = path.clone();
        self.before(
            format!("require_api {path}"),
            restriction.clone(),
            move |ctx: &mut RequestContext| {
                if ctx.capabilities_mut().declare(&hook_path) {
                    debug!(path = %hook_path, "declared capability");
                }
                HookOutcome::Continue
            },
        );
        self.declarations.push(Declaration { path, restriction });
        self
    }

    /// Create the context for a new request to `action`.
    pub fn begin(&self, action: impl Into<String>) -> RequestContext {
        RequestContext::new(self.name.clone(), action)
    }

    /// Run the before-filters for `ctx`.
    pub fn run_filters(&self, ctx: &mut RequestContext) -> ChainResult {
        self.chain.run(ctx)
    }

    /// Handle a request: build a fresh context, run the filters, then the
    /// handler unless a filter halted.
    pub fn dispatch<T, H>(&self, action: impl Into<String>, handler: H) -> Dispatch<T>
    where
        H: FnOnce(&mut RequestContext) -> T,
    {
        let mut context = self.begin(action);
        let span = tracing::debug_span!(
            "request",
            controller = %self.name,
            action = %context.action(),
            request_id = %context.id,
        );
        let _guard = span.enter();

        let outcome = match self.run_filters(&mut context) {
            ChainResult::Completed => Outcome::Completed(handler(&mut context)),
            ChainResult::Halted { filter } => Outcome::Halted { filter },
        };
        Dispatch { context, outcome }
    }
}

//! Before-filter chain.
//!
//! Filters run in registration order before the action handler. Each filter
//! carries a [`Restriction`] deciding which actions it runs for, and may halt
//! the chain, in which case later filters and the handler are skipped.

use std::fmt;
use std::sync::Arc;

use filter::{Decision, Restriction};
use tracing::{debug, trace};

use crate::RequestContext;

/// What the chain should do after a filter ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Continue,
    Halt,
}

/// Body of a before-filter.
pub type PreHook = Arc<dyn Fn(&mut RequestContext) -> HookOutcome + Send + Sync>;

/// A named hook plus the restriction it runs under.
#[derive(Clone)]
pub struct BeforeFilter {
    name: String,
    restriction: Restriction,
    hook: PreHook,
}

impl BeforeFilter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn restriction(&self) -> &Restriction {
        &self.restriction
    }
}

impl fmt::Debug for BeforeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeforeFilter")
            .field("name", &self.name)
            .field("restriction", &self.restriction)
            .finish_non_exhaustive()
    }
}

/// How a chain run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainResult {
    Completed,
    Halted { filter: String },
}

/// Ordered list of before-filters for one controller.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<BeforeFilter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. The restriction is stored as given.
    pub fn push(&mut self, name: impl Into<String>, restriction: Restriction, hook: PreHook) {
        self.filters.push(BeforeFilter {
            name: name.into(),
            restriction,
            hook,
        });
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeforeFilter> {
        self.filters.iter()
    }

    /// Run every filter that applies to the context's action.
    pub fn run(&self, ctx: &mut RequestContext) -> ChainResult {
        for filter in &self.filters {
            if let Decision::Skip { reason } = filter.restriction.check(ctx.action()) {
                trace!(filter = %filter.name, %reason, "skipping filter");
                continue;
            }

            if (filter.hook)(ctx) == HookOutcome::Halt {
                debug!(filter = %filter.name, "filter halted the chain");
                return ChainResult::Halted {
                    filter: filter.name.clone(),
                };
            }
        }
        ChainResult::Completed
    }
}

//! Helpers exposed to the rendering layer.
//!
//! Views get the same capability query the handler uses, either statically
//! through [`ViewHelpers`] or by name through a [`HelperTable`] for template
//! engines that resolve helpers at runtime.

use std::collections::BTreeMap;

use registry::CapabilityRegistry;
use serde_json::Value;

use crate::RequestContext;

/// Read-only request state available to views.
pub trait ViewHelpers {
    fn capabilities(&self) -> &CapabilityRegistry;

    /// Whether `names` was declared for the current request.
    fn has_capability<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.capabilities().has_capability(names)
    }
}

impl ViewHelpers for RequestContext {
    fn capabilities(&self) -> &CapabilityRegistry {
        RequestContext::capabilities(self)
    }
}

impl ViewHelpers for CapabilityRegistry {
    fn capabilities(&self) -> &CapabilityRegistry {
        self
    }
}

/// A helper callable by name with JSON arguments.
pub type Helper = fn(&CapabilityRegistry, &[Value]) -> Value;

/// Name → helper lookup handed to a template engine.
///
/// [`HelperTable::default`] exposes `has_capability`.
#[derive(Debug, Clone)]
pub struct HelperTable {
    helpers: BTreeMap<String, Helper>,
}

impl HelperTable {
    /// A table with no helpers registered.
    pub fn empty() -> Self {
        Self {
            helpers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, helper: Helper) -> &mut Self {
        self.helpers.insert(name.into(), helper);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    /// Call helper `name`, or `None` if no such helper is registered.
    pub fn call(&self, name: &str, view: &impl ViewHelpers, args: &[Value]) -> Option<Value> {
        self.helpers
            .get(name)
            .map(|helper| helper(view.capabilities(), args))
    }
}

impl Default for HelperTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("has_capability", has_capability_helper);
        table
    }
}

// Non-string arguments can never name a capability.
fn has_capability_helper(registry: &CapabilityRegistry, args: &[Value]) -> Value {
    let names: Option<Vec<&str>> = args.iter().map(Value::as_str).collect();
    Value::Bool(names.is_some_and(|names| registry.has_capability(&names)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ControllerDef;
    use filter::Restriction;
    use serde_json::json;

    fn render_check<V: ViewHelpers>(view: &V) -> (bool, bool) {
        (
            view.has_capability(&["google", "maps"]),
            view.has_capability(&["yui"]),
        )
    }

    fn dispatched() -> RequestContext {
        let mut def = ControllerDef::new("maps");
        def.declare(["google", "maps"], Restriction::all()).unwrap();
        def.dispatch("show", |_| ()).context
    }

    #[test]
    fn test_view_sees_handler_answers() {
        let ctx = dispatched();
        assert_eq!(render_check(&ctx), (true, false));
        assert_eq!(render_check(ctx.capabilities()), (true, false));
    }

    #[test]
    fn test_helper_table_has_capability() {
        let ctx = dispatched();
        let helpers = HelperTable::default();

        let call = |args: Value| {
            let args = args.as_array().cloned().unwrap_or_default();
            helpers.call("has_capability", &ctx, &args)
        };
        assert_eq!(call(json!(["google"])), Some(json!(true)));
        assert_eq!(call(json!(["google", "maps"])), Some(json!(true)));
        assert_eq!(call(json!(["google", "visualization"])), Some(json!(false)));
        assert_eq!(call(json!([])), Some(json!(true)));
        assert_eq!(call(json!(["google", 1])), Some(json!(false)));
    }

    #[test]
    fn test_unknown_helper() {
        let ctx = dispatched();
        assert_eq!(HelperTable::default().call("render_map", &ctx, &[]), None);
        assert_eq!(HelperTable::empty().call("has_capability", &ctx, &[]), None);
        assert_eq!(HelperTable::default().names().collect::<Vec<_>>(), ["has_capability"]);
    }
}

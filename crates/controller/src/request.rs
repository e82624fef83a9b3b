//! Per-request state.

use registry::CapabilityRegistry;
use uuid::Uuid;

/// A unique identifier for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State for one request handled by one controller action.
///
/// The capability registry is created empty together with the context and
/// dropped with it. Nothing here is shared between requests.
#[derive(Debug)]
pub struct RequestContext {
    pub id: RequestId,
    controller: String,
    action: String,
    capabilities: CapabilityRegistry,
}

impl RequestContext {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            controller: controller.into(),
            action: action.into(),
            capabilities: CapabilityRegistry::new(),
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Capabilities declared so far in this request.
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn capabilities_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.capabilities
    }

    /// Whether `names` was declared for this request. See
    /// [`CapabilityRegistry::has_capability`].
    pub fn has_capability<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.capabilities.has_capability(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry::CapabilityPath;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = RequestContext::new("maps", "show");
        assert_eq!(ctx.controller(), "maps");
        assert_eq!(ctx.action(), "show");
        assert!(ctx.capabilities().is_empty());
        assert!(!ctx.has_capability(&["google"]));
        assert!(ctx.has_capability::<&str>(&[]));
    }

    #[test]
    fn test_contexts_do_not_share_registries() {
        let mut first = RequestContext::new("maps", "show");
        let second = RequestContext::new("maps", "show");
        first
            .capabilities_mut()
            .declare(&CapabilityPath::parse("google.maps").unwrap());

        assert!(first.has_capability(&["google", "maps"]));
        assert!(!second.has_capability(&["google"]));
        assert_ne!(first.id, second.id);
    }
}

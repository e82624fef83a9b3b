//! The per-request capability tree.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::{CapabilityPath, Name};

/// A node in the capability tree.
///
/// Declarations only ever create branches. A [`Node::Leaf`] can appear when a
/// registry is seeded from foreign data, and is never reported as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf,
    Branch(BTreeMap<Name, Node>),
}

impl Node {
    fn branch() -> Self {
        Node::Branch(BTreeMap::new())
    }

    /// Children of this node, turning a leaf into an empty branch first.
    fn children_mut(&mut self) -> &mut BTreeMap<Name, Node> {
        match self {
            Node::Branch(children) => children,
            Node::Leaf => {
                *self = Node::branch();
                self.children_mut()
            }
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Branch(children_from_json(map)),
            _ => Node::Leaf,
        }
    }
}

fn children_from_json(map: serde_json::Map<String, Value>) -> BTreeMap<Name, Node> {
    map.into_iter()
        .filter_map(|(key, value)| Name::new(key).ok().map(|name| (name, Node::from_json(value))))
        .collect()
}

/// Nested registry of the capability paths declared for one request.
///
/// The root is always a mapping; every declared path is stored as a chain of
/// branches. Paths are only ever added, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilityRegistry {
    root: BTreeMap<Name, Node>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry from JSON.
    ///
    /// Objects become branches and any other value becomes a leaf. A
    /// non-object root yields an empty registry; blank keys are dropped.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                root: children_from_json(map),
            },
            _ => Self::new(),
        }
    }

    /// Upsert `path`, creating missing branches along the way.
    ///
    /// Returns `true` if any branch was created, `false` if the path was
    /// already fully declared.
    pub fn declare(&mut self, path: &CapabilityPath) -> bool {
        let mut created = false;
        let mut children = &mut self.root;
        for name in path.names() {
            let node = children.entry(name.clone()).or_insert_with(|| {
                created = true;
                Node::branch()
            });
            if matches!(node, Node::Leaf) {
                created = true;
            }
            children = node.children_mut();
        }
        created
    }

    /// Whether every name in `names` was declared, in order.
    ///
    /// Stops at the first missing name or leaf. An empty slice is always
    /// `true`.
    pub fn has_capability<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let mut children = &self.root;
        for name in names {
            match children.get(name.as_ref()) {
                Some(Node::Branch(next)) => children = next,
                _ => return false,
            }
        }
        true
    }

    /// Typed variant of [`has_capability`](Self::has_capability).
    pub fn contains(&self, path: &CapabilityPath) -> bool {
        self.has_capability(path.names())
    }

    /// Number of top-level capabilities.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The deepest declared paths, in sorted order.
    ///
    /// Declaring `[google]` and `[google, maps]` reports only `google.maps`,
    /// since the shorter path is implied by the longer one.
    pub fn paths(&self) -> Vec<CapabilityPath> {
        let mut out = Vec::new();
        collect_paths(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

fn collect_paths(
    children: &BTreeMap<Name, Node>,
    prefix: &mut Vec<Name>,
    out: &mut Vec<CapabilityPath>,
) {
    for (name, node) in children {
        let Node::Branch(grandchildren) = node else {
            continue;
        };
        prefix.push(name.clone());
        if grandchildren.values().any(|n| matches!(n, Node::Branch(_))) {
            collect_paths(grandchildren, prefix, out);
        } else if let Ok(path) = CapabilityPath::from_names(prefix.clone()) {
            out.push(path);
        }
        prefix.pop();
    }
}

//! Construction options for every entity of a [`Document`](super::document::Document).
//!
//! Each struct enumerates the attributes a reader may supply when it creates an
//! entity. Options are built with chained setters and consumed by the matching
//! `Document::create_*` method; fields left at their default leave the entity
//! untouched.

use super::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey};
use super::length::Length;
use super::tree::TreeType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOptions {
    pub label: Option<String>,
    pub root: bool,
    /// Links the node to this OTU and mirrors the OTU id into `taxonomy_id`.
    pub otu: Option<OtuKey>,
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn otu(mut self, otu: OtuKey) -> Self {
        self.otu = Some(otu);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeOptions {
    pub label: Option<String>,
    pub source: Option<NodeKey>,
    pub target: Option<NodeKey>,
    pub length: Length,
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source(mut self, source: NodeKey) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: NodeKey) -> Self {
        self.target = Some(target);
        self
    }

    pub fn length(mut self, length: impl Into<Length>) -> Self {
        self.length = length.into();
        self
    }
}

/// Options for a root edge, which has a target but never a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootEdgeOptions {
    pub label: Option<String>,
    pub target: Option<NodeKey>,
    pub length: Length,
}

impl RootEdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn target(mut self, target: NodeKey) -> Self {
        self.target = Some(target);
        self
    }

    pub fn length(mut self, length: impl Into<Length>) -> Self {
        self.length = length.into();
        self
    }
}

/// Options for a tree or network.
///
/// `nodes` are added before `edges`, each in the given order, so edges may refer
/// to any of the listed nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeOptions {
    pub label: Option<String>,
    pub tree_type: TreeType,
    pub nodes: Vec<NodeKey>,
    pub edges: Vec<EdgeKey>,
    pub rootedge: Option<RootEdgeKey>,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tree_type(mut self, tree_type: TreeType) -> Self {
        self.tree_type = tree_type;
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeKey>) -> Self {
        self.nodes = nodes.into_iter().collect();
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        self.edges = edges.into_iter().collect();
        self
    }

    pub fn rootedge(mut self, rootedge: RootEdgeKey) -> Self {
        self.rootedge = Some(rootedge);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreesOptions {
    pub label: Option<String>,
    pub otus: Option<OtusKey>,
    /// Trees and networks to push, dispatched by kind.
    pub trees: Vec<TreeKey>,
}

impl TreesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn otus(mut self, otus: OtusKey) -> Self {
        self.otus = Some(otus);
        self
    }

    pub fn trees(mut self, trees: impl IntoIterator<Item = TreeKey>) -> Self {
        self.trees = trees.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtusOptions {
    pub label: Option<String>,
}

impl OtusOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtuOptions {
    pub label: Option<String>,
    pub otus: Option<OtusKey>,
}

impl OtuOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn otus(mut self, otus: OtusKey) -> Self {
        self.otus = Some(otus);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn setters_chain_and_default_is_empty() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));

        let options = EdgeOptions::new().label("e").source(a).target(b).length("3");
        assert_eq!(options.label.as_deref(), Some("e"));
        assert_eq!(options.source, Some(a));
        assert_eq!(options.target, Some(b));
        assert_eq!(options.length, Length::Text("3".to_string()));

        let empty = TreeOptions::new();
        assert_eq!(empty.tree_type, TreeType::TREE);
        assert!(empty.nodes.is_empty() && empty.edges.is_empty() && empty.rootedge.is_none());
    }
}

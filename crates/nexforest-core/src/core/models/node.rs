use super::ids::{OtuKey, TreeKey};
use crate::core::mapper::{BelongsTo, Identified};

/// A node of a tree or a network.
///
/// A node must have an id that is unique within its tree. It may carry a human
/// readable label and may refer to the OTU it represents. Nodes flagged as roots
/// anchor the per-root traversals of their tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: String,
    /// Marks the node as one of the roots of its tree.
    pub root: bool,
    /// A human readable description.
    pub label: Option<String>,
    pub(crate) otu: BelongsTo<OtuKey>,
    pub(crate) tree: BelongsTo<TreeKey>,
    pub(crate) taxonomy_id: Option<String>,
}

impl Node {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            root: false,
            label: None,
            otu: BelongsTo::default(),
            tree: BelongsTo::default(),
            taxonomy_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// The OTU this node represents, if any.
    pub fn otu(&self) -> Option<OtuKey> {
        self.otu.get()
    }

    /// The tree that currently owns this node, if any.
    pub fn tree(&self) -> Option<TreeKey> {
        self.tree.get()
    }

    /// Mirror of the linked OTU's id, used to group nodes by taxon across a forest.
    pub fn taxonomy_id(&self) -> Option<&str> {
        self.taxonomy_id.as_deref()
    }
}

impl Identified for Node {
    fn id(&self) -> &str {
        &self.id
    }
}

use super::ids::{NodeKey, TreeKey};
use super::length::Length;
use crate::core::mapper::{BelongsTo, Identified};

/// Anything that carries a length.
///
/// The length is a named view over the generic `distance` storage; there is no
/// second field behind it.
pub trait Weighted {
    fn distance(&self) -> &Length;
    fn distance_mut(&mut self) -> &mut Length;

    fn length(&self) -> &Length {
        self.distance()
    }

    fn set_length(&mut self, length: impl Into<Length>) {
        *self.distance_mut() = length.into();
    }
}

/// An edge connecting two nodes of a tree or a network.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) id: String,
    pub(crate) source: Option<NodeKey>,
    pub(crate) target: Option<NodeKey>,
    /// A human readable description.
    pub label: Option<String>,
    pub(crate) distance: Length,
    pub(crate) tree: BelongsTo<TreeKey>,
}

impl Edge {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            source: None,
            target: None,
            label: None,
            distance: Length::Unset,
            tree: BelongsTo::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Option<NodeKey> {
        self.source
    }

    pub fn target(&self) -> Option<NodeKey> {
        self.target
    }

    /// The tree that currently owns this edge, if any.
    pub fn tree(&self) -> Option<TreeKey> {
        self.tree.get()
    }
}

impl Weighted for Edge {
    fn distance(&self) -> &Length {
        &self.distance
    }

    fn distance_mut(&mut self) -> &mut Length {
        &mut self.distance
    }
}

impl Identified for Edge {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An edge without a source, leading into the root of a coalescent tree.
///
/// A root edge has a target and a length like any edge, but no source field and no
/// way to set one.
#[derive(Debug, Clone, PartialEq)]
pub struct RootEdge {
    pub(crate) id: String,
    pub(crate) target: Option<NodeKey>,
    /// A human readable description.
    pub label: Option<String>,
    pub(crate) distance: Length,
    pub(crate) tree: BelongsTo<TreeKey>,
}

impl RootEdge {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            target: None,
            label: None,
            distance: Length::Unset,
            tree: BelongsTo::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Always `None`.
    pub fn source(&self) -> Option<NodeKey> {
        None
    }

    pub fn target(&self) -> Option<NodeKey> {
        self.target
    }

    pub fn tree(&self) -> Option<TreeKey> {
        self.tree.get()
    }
}

impl Weighted for RootEdge {
    fn distance(&self) -> &Length {
        &self.distance
    }

    fn distance_mut(&mut self) -> &mut Length {
        &mut self.distance
    }
}

impl Identified for RootEdge {
    fn id(&self) -> &str {
        &self.id
    }
}

use super::edge::{Edge, RootEdge};
use super::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey, TreesKey};
use super::length::LengthCoercion;
use super::node::Node;
use super::otu::{Otu, Otus};
use super::tree::Tree;
use super::trees::Trees;
use crate::core::mapper::DuplicateIdPolicy;
use slotmap::SlotMap;

/// The arena owning every entity of a NeXML document model.
///
/// Entities refer to each other through typed keys. The fields that encode a
/// relation (tree membership, OTU links, containers) are only written by the
/// document's operations, which keep both sides of every relation and each
/// tree's structural graph consistent. Labels, root flags and lengths can be
/// edited freely through the `_mut` accessors.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) otus_blocks: SlotMap<OtusKey, Otus>,
    pub(crate) otus: SlotMap<OtuKey, Otu>,
    pub(crate) nodes: SlotMap<NodeKey, Node>,
    pub(crate) edges: SlotMap<EdgeKey, Edge>,
    pub(crate) root_edges: SlotMap<RootEdgeKey, RootEdge>,
    pub(crate) trees: SlotMap<TreeKey, Tree>,
    pub(crate) trees_blocks: SlotMap<TreesKey, Trees>,
    /// Policy applied when an id-indexed collection already holds the id.
    pub(crate) duplicate_ids: DuplicateIdPolicy,
    /// How non-numeric text lengths are treated by numeric trees.
    pub(crate) length_coercion: LengthCoercion,
}

impl Document {
    /// Creates an empty document with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicate_ids(&self) -> DuplicateIdPolicy {
        self.duplicate_ids
    }

    pub fn length_coercion(&self) -> LengthCoercion {
        self.length_coercion
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// Mutable access to an edge's label and length.
    ///
    /// Lengths written here bypass the coercion of numeric trees; use
    /// `Document::set_edge_length` to keep them normalised.
    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut Edge> {
        self.edges.get_mut(key)
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.edges.iter()
    }

    pub fn root_edge(&self, key: RootEdgeKey) -> Option<&RootEdge> {
        self.root_edges.get(key)
    }

    pub fn root_edge_mut(&mut self, key: RootEdgeKey) -> Option<&mut RootEdge> {
        self.root_edges.get_mut(key)
    }

    pub fn tree(&self, key: TreeKey) -> Option<&Tree> {
        self.trees.get(key)
    }

    pub fn tree_mut(&mut self, key: TreeKey) -> Option<&mut Tree> {
        self.trees.get_mut(key)
    }

    pub fn trees_iter(&self) -> impl Iterator<Item = (TreeKey, &Tree)> {
        self.trees.iter()
    }

    pub fn trees_block(&self, key: TreesKey) -> Option<&Trees> {
        self.trees_blocks.get(key)
    }

    pub fn trees_block_mut(&mut self, key: TreesKey) -> Option<&mut Trees> {
        self.trees_blocks.get_mut(key)
    }

    pub fn trees_blocks_iter(&self) -> impl Iterator<Item = (TreesKey, &Trees)> {
        self.trees_blocks.iter()
    }

    pub fn otu(&self, key: OtuKey) -> Option<&Otu> {
        self.otus.get(key)
    }

    pub fn otu_mut(&mut self, key: OtuKey) -> Option<&mut Otu> {
        self.otus.get_mut(key)
    }

    pub fn otus_block(&self, key: OtusKey) -> Option<&Otus> {
        self.otus_blocks.get(key)
    }

    pub fn otus_block_mut(&mut self, key: OtusKey) -> Option<&mut Otus> {
        self.otus_blocks.get_mut(key)
    }

    /// Every node of `tree` in registration order, resolved to the entity.
    pub fn tree_nodes(&self, tree: TreeKey) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.trees
            .get(tree)
            .into_iter()
            .flat_map(|tree| tree.nodes.keys())
            .filter_map(|key| self.nodes.get(key).map(|node| (key, node)))
    }

    /// Every edge of `tree` in registration order, resolved to the entity.
    pub fn tree_edges(&self, tree: TreeKey) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.trees
            .get(tree)
            .into_iter()
            .flat_map(|tree| tree.edges.keys())
            .filter_map(|key| self.edges.get(key).map(|edge| (key, edge)))
    }
}

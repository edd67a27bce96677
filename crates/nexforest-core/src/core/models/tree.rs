use super::ids::{EdgeKey, NodeKey, RootEdgeKey, TreesKey};
use super::length::LengthKind;
use crate::core::graph::Graph;
use crate::core::mapper::{BelongsTo, HasN, HasOne, Identified};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether the underlying graph is expected to be a tree or may be any network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeKind {
    #[default]
    Tree,
    Network,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Tree => write!(f, "tree"),
            TreeKind::Network => write!(f, "network"),
        }
    }
}

/// The concrete type of a tree: its kind plus the representation of its lengths.
///
/// Parses and prints the NeXML type names (`IntTree`, `FloatNetwork`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TreeType {
    pub kind: TreeKind,
    pub lengths: LengthKind,
}

impl TreeType {
    pub const TREE: Self = Self::new(TreeKind::Tree, LengthKind::Any);
    pub const INT_TREE: Self = Self::new(TreeKind::Tree, LengthKind::Int);
    pub const FLOAT_TREE: Self = Self::new(TreeKind::Tree, LengthKind::Float);
    pub const NETWORK: Self = Self::new(TreeKind::Network, LengthKind::Any);
    pub const INT_NETWORK: Self = Self::new(TreeKind::Network, LengthKind::Int);
    pub const FLOAT_NETWORK: Self = Self::new(TreeKind::Network, LengthKind::Float);

    pub const fn new(kind: TreeKind, lengths: LengthKind) -> Self {
        Self { kind, lengths }
    }
}

#[derive(Debug, Error)]
#[error("Invalid tree type string")]
pub struct ParseTreeTypeError;

impl FromStr for TreeType {
    type Err = ParseTreeTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_prefix("nex:").unwrap_or(&lowered);
        match name {
            "tree" => Ok(Self::TREE),
            "inttree" => Ok(Self::INT_TREE),
            "floattree" => Ok(Self::FLOAT_TREE),
            "network" => Ok(Self::NETWORK),
            "intnetwork" => Ok(Self::INT_NETWORK),
            "floatnetwork" => Ok(Self::FLOAT_NETWORK),
            _ => Err(ParseTreeTypeError),
        }
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.lengths {
            LengthKind::Any => "",
            LengthKind::Int => "Int",
            LengthKind::Float => "Float",
        };
        let kind = match self.kind {
            TreeKind::Tree => "Tree",
            TreeKind::Network => "Network",
        };
        write!(f, "{}{}", prefix, kind)
    }
}

/// A tree or network: a forest container with any number of root nodes.
///
/// Every node and edge registered with the tree appears both in the id-indexed
/// registries and in the structural graph; the document's operations keep the
/// two in lockstep.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) id: String,
    /// A human readable description.
    pub label: Option<String>,
    pub(crate) tree_type: TreeType,
    pub(crate) rootedge: HasOne<RootEdgeKey>,
    pub(crate) container: BelongsTo<TreesKey>,
    pub(crate) nodes: HasN<NodeKey>,
    pub(crate) edges: HasN<EdgeKey>,
    pub(crate) graph: Graph<NodeKey, EdgeKey>,
}

impl Tree {
    pub(crate) fn new(id: &str, tree_type: TreeType) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            tree_type,
            rootedge: HasOne::default(),
            container: BelongsTo::default(),
            nodes: HasN::new(),
            edges: HasN::new(),
            graph: Graph::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree_type(&self) -> TreeType {
        self.tree_type
    }

    pub fn kind(&self) -> TreeKind {
        self.tree_type.kind
    }

    pub fn is_network(&self) -> bool {
        self.tree_type.kind == TreeKind::Network
    }

    pub fn length_kind(&self) -> LengthKind {
        self.tree_type.lengths
    }

    pub fn rootedge(&self) -> Option<RootEdgeKey> {
        self.rootedge.get()
    }

    /// The trees block this tree belongs to.
    pub fn container(&self) -> Option<TreesKey> {
        self.container.get()
    }

    pub fn nodes(&self) -> &HasN<NodeKey> {
        &self.nodes
    }

    pub fn edges(&self) -> &HasN<EdgeKey> {
        &self.edges
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<NodeKey> {
        self.nodes.get(id)
    }

    pub fn get_edge_by_id(&self, id: &str) -> Option<EdgeKey> {
        self.edges.get(id)
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Read access to the structural graph.
    pub fn graph(&self) -> &Graph<NodeKey, EdgeKey> {
        &self.graph
    }

    /// Nodes sharing an edge with `node`.
    pub fn adjacent_nodes(&self, node: NodeKey) -> Vec<NodeKey> {
        self.graph.adjacent_nodes(node)
    }
}

impl Identified for Tree {
    fn id(&self) -> &str {
        &self.id
    }
}

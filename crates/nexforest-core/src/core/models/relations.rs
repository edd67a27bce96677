//! Every association of the document model, declared once.

use super::edge::{Edge, RootEdge};
use super::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey, TreesKey};
use super::node::Node;
use super::otu::{Otu, Otus};
use super::tree::Tree;
use super::trees::Trees;
use crate::relation;

relation! {
    /// OTUs declared by an OTU block.
    pub OtusOtu: Otus.otus[OtusKey] has_n Otu.otus[OtuKey];
}

relation! {
    /// Tree blocks describing the taxa of an OTU block.
    pub OtusTrees: Otus.trees[OtusKey] has_n Trees.otus[TreesKey];
}

relation! {
    /// Nodes representing an OTU.
    pub OtuNodes: Otu.nodes[OtuKey] has_n Node.otu[NodeKey];
}

relation! {
    /// Nodes registered with a tree.
    pub TreeNodes: Tree.nodes[TreeKey] has_n Node.tree[NodeKey];
}

relation! {
    /// Edges registered with a tree.
    pub TreeEdges: Tree.edges[TreeKey] has_n Edge.tree[EdgeKey];
}

relation! {
    /// The edge leading into the root of a coalescent tree.
    pub TreeRootEdge: Tree.rootedge[TreeKey] has_one RootEdge.tree[RootEdgeKey];
}

relation! {
    /// Trees of a tree block.
    pub TreesTrees: Trees.trees[TreesKey] has_n Tree.container[TreeKey];
}

relation! {
    /// Networks of a tree block. Shares the member back reference with [`TreesTrees`].
    pub TreesNetworks: Trees.networks[TreesKey] has_n Tree.container[TreeKey];
}

use super::error::{ForestError, Result};
use crate::core::mapper::MemberRef;
use crate::core::models::document::Document;
use crate::core::models::edge::{Edge, RootEdge};
use crate::core::models::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey, TreesKey};
use crate::core::models::node::Node;
use crate::core::models::otu::{Otu, Otus};
use crate::core::models::tree::{Tree, TreeKind};
use crate::core::models::trees::Trees;
use tracing::debug;

impl Document {
    /// Removes a node from the document after severing every reference to it.
    ///
    /// Its tree drops it along with the incident edges, its OTU forgets it, and
    /// detached edges or root edges pointing at it lose that endpoint.
    pub fn destroy_node(&mut self, node: NodeKey) -> Result<Node> {
        let entity = self.node_entry(node)?;
        let (tree, otu) = (entity.tree.get(), entity.otu.get());
        if let Some(tree) = tree {
            self.remove_node(tree, node)?;
        }
        if otu.is_some() {
            self.set_node_otu(node, None)?;
        }

        for (_, edge) in self.edges.iter_mut() {
            if edge.source == Some(node) {
                edge.source = None;
            }
            if edge.target == Some(node) {
                edge.target = None;
            }
        }
        for (_, rootedge) in self.root_edges.iter_mut() {
            if rootedge.target == Some(node) {
                rootedge.target = None;
            }
        }

        let removed = self
            .nodes
            .remove(node)
            .ok_or(ForestError::UnknownKey { entity: "node" })?;
        debug!(node = %removed.id, "node destroyed");
        Ok(removed)
    }

    /// Removes an edge from the document, detaching it from its tree first.
    pub fn destroy_edge(&mut self, edge: EdgeKey) -> Result<Edge> {
        if let Some(tree) = self.edge_entry(edge)?.tree.get() {
            self.remove_edge(tree, edge)?;
        }
        let removed = self
            .edges
            .remove(edge)
            .ok_or(ForestError::UnknownKey { entity: "edge" })?;
        debug!(edge = %removed.id, "edge destroyed");
        Ok(removed)
    }

    pub fn destroy_root_edge(&mut self, rootedge: RootEdgeKey) -> Result<RootEdge> {
        self.root_edge_entry(rootedge)?;
        self.set_rootedge_tree(rootedge, None)?;
        self.root_edges
            .remove(rootedge)
            .ok_or(ForestError::UnknownKey { entity: "root edge" })
    }

    /// Removes a tree or network from the document.
    ///
    /// Its nodes, edges and root edge stay in the document, detached.
    pub fn destroy_tree(&mut self, tree: TreeKey) -> Result<Tree> {
        let entity = self.tree_entry(tree)?;
        let (container, kind) = (entity.container.get(), entity.kind());

        self.set_tree_edges(tree, &[])?;
        self.set_tree_nodes(tree, &[])?;
        self.set_rootedge(tree, None)?;
        if let Some(block) = container {
            match kind {
                TreeKind::Tree => self.delete_tree(block, MemberRef::Key(tree)),
                TreeKind::Network => self.delete_network(block, MemberRef::Key(tree)),
            };
        }

        let removed = self
            .trees
            .remove(tree)
            .ok_or(ForestError::UnknownKey { entity: "tree" })?;
        debug!(tree = %removed.id, "tree destroyed");
        Ok(removed)
    }

    /// Removes a tree block. Its trees and networks stay in the document, detached.
    pub fn destroy_trees_block(&mut self, trees: TreesKey) -> Result<Trees> {
        let block = self.trees_entry(trees)?;
        let members: Vec<TreeKey> = block.iter().collect();
        for tree in members {
            self.delete_tree(trees, MemberRef::Key(tree));
            self.delete_network(trees, MemberRef::Key(tree));
        }
        self.set_trees_otus(trees, None)?;
        self.trees_blocks
            .remove(trees)
            .ok_or(ForestError::UnknownKey { entity: "trees block" })
    }

    /// Removes an OTU, clearing the OTU link and taxonomy id of its nodes.
    pub fn destroy_otu(&mut self, otu: OtuKey) -> Result<Otu> {
        self.otu_entry(otu)?;
        self.set_otu_nodes(otu, &[])?;
        self.set_otu_otus(otu, None)?;
        self.otus
            .remove(otu)
            .ok_or(ForestError::UnknownKey { entity: "otu" })
    }

    /// Removes an OTU block. Its OTUs stay in the document and tree blocks
    /// lose their link to it.
    pub fn destroy_otus_block(&mut self, otus: OtusKey) -> Result<Otus> {
        let block = self.otus_entry(otus)?;
        let members: Vec<OtuKey> = block.otus.to_vec();
        let described: Vec<TreesKey> = block.trees.to_vec();
        for otu in members {
            self.remove_otu(otus, MemberRef::Key(otu));
        }
        for trees in described {
            self.set_trees_otus(trees, None)?;
        }
        self.otus_blocks
            .remove(otus)
            .ok_or(ForestError::UnknownKey { entity: "otus block" })
    }
}

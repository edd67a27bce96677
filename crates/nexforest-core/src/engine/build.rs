//! Entity construction from option structs.
//!
//! Every `create_*` method inserts the entity, applies its options and returns
//! its key. The `create_*_with` variants then hand the new key to a configurator
//! that may refine the entity through any document operation. If an option or
//! the configurator fails, the entity is destroyed again and the error returned.
//!
//! Options may pull existing members out of other trees and blocks, or evict a
//! same-id member from an OTU or OTU block. Those memberships are recorded
//! before the options run and put back when construction fails.

use super::error::Result;
use crate::core::mapper::MemberRef;
use crate::core::models::document::Document;
use crate::core::models::edge::{Edge, RootEdge};
use crate::core::models::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey, TreesKey};
use crate::core::models::length::Length;
use crate::core::models::node::Node;
use crate::core::models::options::{
    EdgeOptions, NodeOptions, OtuOptions, OtusOptions, RootEdgeOptions, TreeOptions, TreesOptions,
};
use crate::core::models::otu::{Otu, Otus};
use crate::core::models::tree::Tree;
use crate::core::models::trees::Trees;
use tracing::{debug, warn};

fn no_configurator<K>(_: &mut Document, _: K) -> Result<()> {
    Ok(())
}

/// Memberships of existing entities that a construction may disturb.
#[derive(Debug, Default)]
struct Displaced {
    /// Previous trees of listed nodes and edges, with their members in registration order.
    trees: Vec<(TreeKey, Vec<NodeKey>, Vec<EdgeKey>)>,
    lengths: Vec<(EdgeKey, Length)>,
    rootedge: Option<(RootEdgeKey, TreeKey)>,
    /// Previous blocks of listed trees, with their trees and networks in order.
    blocks: Vec<(TreesKey, Vec<TreeKey>, Vec<TreeKey>)>,
    otu_node: Option<(NodeKey, OtuKey)>,
    otus_member: Option<(OtuKey, OtusKey)>,
}

impl Document {
    pub fn create_node(&mut self, id: &str, options: NodeOptions) -> Result<NodeKey> {
        self.create_node_with(id, options, no_configurator)
    }

    pub fn create_node_with(
        &mut self,
        id: &str,
        options: NodeOptions,
        configure: impl FnOnce(&mut Document, NodeKey) -> Result<()>,
    ) -> Result<NodeKey> {
        let mut displaced = Displaced::default();
        if let Some(otu) = options.otu {
            displaced.otu_node = self
                .otus
                .get(otu)
                .and_then(|entity| entity.nodes.get(id))
                .map(|occupant| (occupant, otu));
        }
        let mut node = Node::new(id);
        node.label = options.label;
        node.root = options.root;
        let key = self.nodes.insert(node);

        self.finish(
            key,
            |doc, key| {
                if let Some(otu) = options.otu {
                    doc.set_node_otu(key, Some(otu))?;
                }
                configure(doc, key)
            },
            |doc, key| {
                doc.destroy_node(key)?;
                doc.restore(displaced)
            },
        )
    }

    /// Creates a detached edge. Source and target, when given, must be live nodes.
    pub fn create_edge(&mut self, id: &str, options: EdgeOptions) -> Result<EdgeKey> {
        self.create_edge_with(id, options, no_configurator)
    }

    pub fn create_edge_with(
        &mut self,
        id: &str,
        options: EdgeOptions,
        configure: impl FnOnce(&mut Document, EdgeKey) -> Result<()>,
    ) -> Result<EdgeKey> {
        let mut edge = Edge::new(id);
        edge.label = options.label;
        edge.distance = options.length;
        let key = self.edges.insert(edge);

        self.finish(
            key,
            |doc, key| {
                if options.source.is_some() || options.target.is_some() {
                    doc.set_edge_endpoints(key, options.source, options.target)?;
                }
                configure(doc, key)
            },
            |doc, key| doc.destroy_edge(key).map(drop),
        )
    }

    pub fn create_root_edge(&mut self, id: &str, options: RootEdgeOptions) -> Result<RootEdgeKey> {
        self.create_root_edge_with(id, options, no_configurator)
    }

    pub fn create_root_edge_with(
        &mut self,
        id: &str,
        options: RootEdgeOptions,
        configure: impl FnOnce(&mut Document, RootEdgeKey) -> Result<()>,
    ) -> Result<RootEdgeKey> {
        if let Some(target) = options.target {
            self.node_entry(target)?;
        }
        let mut rootedge = RootEdge::new(id);
        rootedge.label = options.label;
        rootedge.target = options.target;
        rootedge.distance = options.length;
        let key = self.root_edges.insert(rootedge);

        self.finish(key, configure, |doc, key| doc.destroy_root_edge(key).map(drop))
    }

    /// Creates a tree or network and registers the listed nodes, then edges,
    /// then the root edge.
    pub fn create_tree(&mut self, id: &str, options: TreeOptions) -> Result<TreeKey> {
        self.create_tree_with(id, options, no_configurator)
    }

    pub fn create_tree_with(
        &mut self,
        id: &str,
        options: TreeOptions,
        configure: impl FnOnce(&mut Document, TreeKey) -> Result<()>,
    ) -> Result<TreeKey> {
        let displaced = self.displaced_by_tree(&options);
        let mut tree = Tree::new(id, options.tree_type);
        tree.label = options.label;
        let key = self.trees.insert(tree);

        self.finish(
            key,
            |doc, key| {
                for node in options.nodes {
                    doc.add_node(key, node)?;
                }
                for edge in options.edges {
                    doc.add_edge(key, edge)?;
                }
                if let Some(rootedge) = options.rootedge {
                    doc.set_rootedge(key, Some(rootedge))?;
                }
                configure(doc, key)
            },
            |doc, key| {
                doc.destroy_tree(key)?;
                doc.restore(displaced)
            },
        )
    }

    pub fn create_trees(&mut self, id: &str, options: TreesOptions) -> Result<TreesKey> {
        self.create_trees_with(id, options, no_configurator)
    }

    pub fn create_trees_with(
        &mut self,
        id: &str,
        options: TreesOptions,
        configure: impl FnOnce(&mut Document, TreesKey) -> Result<()>,
    ) -> Result<TreesKey> {
        let displaced = self.displaced_by_block(&options.trees);
        let mut block = Trees::new(id);
        block.label = options.label;
        let key = self.trees_blocks.insert(block);

        self.finish(
            key,
            |doc, key| {
                if let Some(otus) = options.otus {
                    doc.set_trees_otus(key, Some(otus))?;
                }
                for tree in options.trees {
                    doc.push_tree(key, tree)?;
                }
                configure(doc, key)
            },
            |doc, key| {
                doc.destroy_trees_block(key)?;
                doc.restore(displaced)
            },
        )
    }

    pub fn create_otus(&mut self, id: &str, options: OtusOptions) -> Result<OtusKey> {
        self.create_otus_with(id, options, no_configurator)
    }

    pub fn create_otus_with(
        &mut self,
        id: &str,
        options: OtusOptions,
        configure: impl FnOnce(&mut Document, OtusKey) -> Result<()>,
    ) -> Result<OtusKey> {
        let mut block = Otus::new(id);
        block.label = options.label;
        let key = self.otus_blocks.insert(block);

        self.finish(key, configure, |doc, key| doc.destroy_otus_block(key).map(drop))
    }

    pub fn create_otu(&mut self, id: &str, options: OtuOptions) -> Result<OtuKey> {
        self.create_otu_with(id, options, no_configurator)
    }

    pub fn create_otu_with(
        &mut self,
        id: &str,
        options: OtuOptions,
        configure: impl FnOnce(&mut Document, OtuKey) -> Result<()>,
    ) -> Result<OtuKey> {
        let mut displaced = Displaced::default();
        if let Some(otus) = options.otus {
            displaced.otus_member = self
                .otus_blocks
                .get(otus)
                .and_then(|block| block.otus.get(id))
                .map(|occupant| (occupant, otus));
        }
        let mut otu = Otu::new(id);
        otu.label = options.label;
        let key = self.otus.insert(otu);

        self.finish(
            key,
            |doc, key| {
                if let Some(otus) = options.otus {
                    doc.add_otu(otus, key)?;
                }
                configure(doc, key)
            },
            |doc, key| {
                doc.destroy_otu(key)?;
                doc.restore(displaced)
            },
        )
    }

    fn displaced_by_tree(&self, options: &TreeOptions) -> Displaced {
        let mut displaced = Displaced::default();
        let node_trees = options
            .nodes
            .iter()
            .filter_map(|&node| self.nodes.get(node).and_then(|entity| entity.tree.get()));
        let edge_trees = options
            .edges
            .iter()
            .filter_map(|&edge| self.edges.get(edge).and_then(|entity| entity.tree.get()));
        for tree in node_trees.chain(edge_trees) {
            if displaced.trees.iter().any(|(seen, _, _)| *seen == tree) {
                continue;
            }
            if let Some(entity) = self.trees.get(tree) {
                displaced
                    .trees
                    .push((tree, entity.nodes.to_vec(), entity.edges.to_vec()));
            }
        }
        displaced.lengths = options
            .edges
            .iter()
            .filter_map(|&edge| self.edges.get(edge).map(|entity| (edge, entity.distance.clone())))
            .collect();
        displaced.rootedge = options.rootedge.and_then(|rootedge| {
            let tree = self.root_edges.get(rootedge)?.tree.get()?;
            Some((rootedge, tree))
        });
        displaced
    }

    fn displaced_by_block(&self, trees: &[TreeKey]) -> Displaced {
        let mut displaced = Displaced::default();
        for &tree in trees {
            let Some(block) = self.trees.get(tree).and_then(|entity| entity.container.get()) else {
                continue;
            };
            if displaced.blocks.iter().any(|(seen, _, _)| *seen == block) {
                continue;
            }
            if let Some(entity) = self.trees_blocks.get(block) {
                displaced
                    .blocks
                    .push((block, entity.trees.to_vec(), entity.networks.to_vec()));
            }
        }
        displaced
    }

    /// Puts displaced members back where they were, in their previous order.
    fn restore(&mut self, displaced: Displaced) -> Result<()> {
        for (tree, nodes, edges) in displaced.trees {
            self.set_tree_edges(tree, &[])?;
            self.set_tree_nodes(tree, &[])?;
            self.set_tree_nodes(tree, &nodes)?;
            self.set_tree_edges(tree, &edges)?;
        }
        for (edge, length) in displaced.lengths {
            if let Some(entity) = self.edges.get_mut(edge) {
                entity.distance = length;
            }
        }
        if let Some((rootedge, tree)) = displaced.rootedge {
            self.set_rootedge(tree, Some(rootedge))?;
        }
        for (block, trees, networks) in displaced.blocks {
            let current: Vec<TreeKey> = self.trees_entry(block)?.iter().collect();
            for tree in current {
                self.delete_tree(block, MemberRef::Key(tree));
                self.delete_network(block, MemberRef::Key(tree));
            }
            for tree in trees {
                self.add_tree(block, tree)?;
            }
            for network in networks {
                self.add_network(block, network)?;
            }
        }
        if let Some((node, otu)) = displaced.otu_node {
            self.set_node_otu(node, Some(otu))?;
        }
        if let Some((otu, otus)) = displaced.otus_member {
            self.set_otu_otus(otu, Some(otus))?;
        }
        Ok(())
    }

    /// Runs `setup` on a freshly inserted entity and destroys the entity if it fails.
    fn finish<K: Copy + std::fmt::Debug>(
        &mut self,
        key: K,
        setup: impl FnOnce(&mut Document, K) -> Result<()>,
        destroy: impl FnOnce(&mut Document, K) -> Result<()>,
    ) -> Result<K> {
        match setup(self, key) {
            Ok(()) => {
                debug!(key = ?key, "entity created");
                Ok(key)
            }
            Err(error) => {
                if let Err(cleanup) = destroy(self, key) {
                    warn!(key = ?key, error = %cleanup, "could not discard half-built entity");
                }
                Err(error)
            }
        }
    }
}

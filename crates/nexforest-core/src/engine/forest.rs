use super::access::surviving;
use super::error::{ForestError, Result};
use crate::core::mapper::{self, DuplicateIdPolicy, MapperError, MemberRef, Relation};
use crate::core::models::document::Document;
use crate::core::models::edge::Edge;
use crate::core::models::ids::{EdgeKey, NodeKey, RootEdgeKey, TreeKey};
use crate::core::models::length::Length;
use crate::core::models::relations::{TreeEdges, TreeNodes, TreeRootEdge};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A node or an edge of a tree.
///
/// Used both to push members into a tree and to report what an id lookup found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeMember {
    Node(NodeKey),
    Edge(EdgeKey),
}

impl Document {
    /// Registers `node` with `tree`, both in the id registry and in the graph.
    ///
    /// A node owned by another tree is removed from it first, together with its
    /// incident edges there. Adding a node that is already a member does nothing.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, an empty node id, or an id taken by another node
    /// under [`DuplicateIdPolicy::Reject`]. Under the default overwrite policy the
    /// previous holder of the id is removed as by [`Document::remove_node`].
    pub fn add_node(&mut self, tree: TreeKey, node: NodeKey) -> Result<()> {
        let tree_entity = self.tree_entry(tree)?;
        let node_entity = self.node_entry(node)?;
        if node_entity.id.is_empty() {
            return Err(MapperError::MissingId {
                relation: TreeNodes::NAME,
            }
            .into());
        }
        let previous = node_entity.tree.get();
        if previous == Some(tree) {
            return Ok(());
        }

        let id = node_entity.id.clone();
        let tree_id = tree_entity.id.clone();
        let evicted = match tree_entity.nodes.get(&id) {
            Some(occupant) => Some(self.claim_id(occupant, &id, "tree", &tree_id)?),
            None => None,
        };

        if let Some(occupant) = evicted {
            warn!(tree = %tree_id, node = %id, "replacing node with duplicate id");
            self.remove_node(tree, occupant)?;
        }
        if let Some(old) = previous {
            self.remove_node(old, node)?;
        }

        self.trees[tree].graph.add_node(node);
        mapper::add::<TreeNodes, _, _>(
            &mut self.trees,
            &mut self.nodes,
            tree,
            node,
            DuplicateIdPolicy::Overwrite,
        )?;
        debug!(tree = %tree_id, node = %id, "node added");
        Ok(())
    }

    /// Registers `edge` with `tree` and connects its endpoints in the graph.
    ///
    /// Both endpoints must already be members of `tree`. Numeric trees coerce the
    /// edge length to their representation as part of the insertion.
    ///
    /// # Errors
    ///
    /// Fails before any change when an endpoint is missing or outside the tree,
    /// when the edge would be a self-loop or would duplicate another edge between
    /// the same two nodes, when its length cannot be coerced, or on a duplicate id
    /// under [`DuplicateIdPolicy::Reject`].
    pub fn add_edge(&mut self, tree: TreeKey, edge: EdgeKey) -> Result<()> {
        let tree_entity = self.tree_entry(tree)?;
        let edge_entity = self.edge_entry(edge)?;
        if edge_entity.id.is_empty() {
            return Err(MapperError::MissingId {
                relation: TreeEdges::NAME,
            }
            .into());
        }
        let previous = edge_entity.tree.get();
        if previous == Some(tree) {
            return Ok(());
        }

        let (source, target) = self.endpoints_in(tree, edge_entity)?;
        let length = edge_entity
            .distance
            .coerce(tree_entity.length_kind(), self.length_coercion)?;

        let id = edge_entity.id.clone();
        let tree_id = tree_entity.id.clone();
        let evicted = match tree_entity.edges.get(&id) {
            Some(occupant) => Some(self.claim_id(occupant, &id, "tree", &tree_id)?),
            None => None,
        };
        if let Some(existing) = tree_entity.graph.edge_between(source, target) {
            if Some(existing) != evicted {
                return Err(ForestError::ParallelEdge {
                    edge: id,
                    existing: self.edges[existing].id.clone(),
                    tree: tree_id,
                });
            }
        }

        if let Some(occupant) = evicted {
            warn!(tree = %tree_id, edge = %id, "replacing edge with duplicate id");
            self.remove_edge(tree, occupant)?;
        }
        if let Some(old) = previous {
            self.remove_edge(old, edge)?;
        }

        if self.trees[tree].graph.add_edge(source, target, edge).is_none() {
            return Err(ForestError::EndpointNotInTree {
                edge: id,
                node: self.nodes[source].id.clone(),
                tree: tree_id,
            });
        }
        mapper::add::<TreeEdges, _, _>(
            &mut self.trees,
            &mut self.edges,
            tree,
            edge,
            DuplicateIdPolicy::Overwrite,
        )?;
        self.edges[edge].distance = length;
        debug!(tree = %tree_id, edge = %id, "edge added");
        Ok(())
    }

    /// Removes `node` from `tree`, cascading to every edge incident to it.
    ///
    /// The node stays in the document, detached from any tree.
    pub fn remove_node(&mut self, tree: TreeKey, node: NodeKey) -> Result<()> {
        let tree_entity = self.tree_entry(tree)?;
        let node_entity = self.node_entry(node)?;
        if tree_entity.nodes.get(&node_entity.id) != Some(node) {
            return Err(ForestError::NotFound {
                entity: "node",
                id: node_entity.id.clone(),
                tree: tree_entity.id.clone(),
            });
        }

        let incident = self.trees[tree].graph.remove_node(node).unwrap_or_default();
        for &edge in &incident {
            mapper::remove::<TreeEdges, _, _>(
                &mut self.trees,
                &mut self.edges,
                tree,
                MemberRef::Key(edge),
            );
        }
        mapper::remove::<TreeNodes, _, _>(&mut self.trees, &mut self.nodes, tree, MemberRef::Key(node));
        debug!(
            tree = %self.trees[tree].id,
            node = %self.nodes[node].id,
            cascaded_edges = incident.len(),
            "node removed"
        );
        Ok(())
    }

    /// Removes exactly `edge` from `tree`. Its endpoints stay members.
    pub fn remove_edge(&mut self, tree: TreeKey, edge: EdgeKey) -> Result<()> {
        let tree_entity = self.tree_entry(tree)?;
        let edge_entity = self.edge_entry(edge)?;
        if tree_entity.edges.get(&edge_entity.id) != Some(edge) {
            return Err(ForestError::NotFound {
                entity: "edge",
                id: edge_entity.id.clone(),
                tree: tree_entity.id.clone(),
            });
        }

        self.trees[tree].graph.remove_edge(edge);
        mapper::remove::<TreeEdges, _, _>(&mut self.trees, &mut self.edges, tree, MemberRef::Key(edge));
        debug!(tree = %self.trees[tree].id, edge = %self.edges[edge].id, "edge removed");
        Ok(())
    }

    /// Moves `node` into `tree`, or detaches it from its tree when `tree` is `None`.
    pub fn set_node_tree(&mut self, node: NodeKey, tree: Option<TreeKey>) -> Result<()> {
        let current = self.node_entry(node)?.tree.get();
        match (tree, current) {
            (Some(tree), _) => self.add_node(tree, node),
            (None, Some(old)) => self.remove_node(old, node),
            (None, None) => Ok(()),
        }
    }

    /// Moves `edge` into `tree`, or detaches it from its tree when `tree` is `None`.
    pub fn set_edge_tree(&mut self, edge: EdgeKey, tree: Option<TreeKey>) -> Result<()> {
        let current = self.edge_entry(edge)?.tree.get();
        match (tree, current) {
            (Some(tree), _) => self.add_edge(tree, edge),
            (None, Some(old)) => self.remove_edge(old, edge),
            (None, None) => Ok(()),
        }
    }

    /// Makes `nodes` the exact node set of `tree`.
    ///
    /// Current nodes that are not listed are removed with their incident edges.
    /// Everything is validated before the first change.
    pub fn set_tree_nodes(&mut self, tree: TreeKey, nodes: &[NodeKey]) -> Result<()> {
        let survivors = {
            let tree_entity = self.tree_entry(tree)?;
            let mut entries = Vec::with_capacity(nodes.len());
            for &node in nodes {
                let entity = self.node_entry(node)?;
                if entity.id.is_empty() {
                    return Err(MapperError::MissingId {
                        relation: TreeNodes::NAME,
                    }
                    .into());
                }
                entries.push((node, entity.id.as_str()));
            }
            surviving(&entries, self.duplicate_ids).map_err(|id| ForestError::DuplicateId {
                id,
                container: "tree",
                owner: tree_entity.id.clone(),
            })?
        };

        let keep: HashSet<NodeKey> = survivors.iter().copied().collect();
        let dropped: Vec<NodeKey> = self.trees[tree]
            .nodes
            .keys()
            .filter(|key| !keep.contains(key))
            .collect();
        for node in dropped {
            self.remove_node(tree, node)?;
        }
        for node in survivors {
            self.add_node(tree, node)?;
        }
        Ok(())
    }

    /// Makes `edges` the exact edge set of `tree`.
    ///
    /// Every listed edge must be insertable once the unlisted edges are gone;
    /// nothing changes if one of them is not.
    pub fn set_tree_edges(&mut self, tree: TreeKey, edges: &[EdgeKey]) -> Result<()> {
        let survivors = {
            let tree_entity = self.tree_entry(tree)?;
            let mut entries = Vec::with_capacity(edges.len());
            for &edge in edges {
                let entity = self.edge_entry(edge)?;
                if entity.id.is_empty() {
                    return Err(MapperError::MissingId {
                        relation: TreeEdges::NAME,
                    }
                    .into());
                }
                entries.push((edge, entity.id.as_str()));
            }
            let survivors =
                surviving(&entries, self.duplicate_ids).map_err(|id| ForestError::DuplicateId {
                    id,
                    container: "tree",
                    owner: tree_entity.id.clone(),
                })?;

            let mut pairs: Vec<((NodeKey, NodeKey), EdgeKey)> = Vec::new();
            for &edge in &survivors {
                let entity = &self.edges[edge];
                let (source, target) = self.endpoints_in(tree, entity)?;
                entity
                    .distance
                    .coerce(tree_entity.length_kind(), self.length_coercion)?;
                let pair = (source.min(target), source.max(target));
                if let Some(&(_, existing)) = pairs.iter().find(|(seen, _)| *seen == pair) {
                    return Err(ForestError::ParallelEdge {
                        edge: entity.id.clone(),
                        existing: self.edges[existing].id.clone(),
                        tree: tree_entity.id.clone(),
                    });
                }
                pairs.push((pair, edge));
            }
            survivors
        };

        let keep: HashSet<EdgeKey> = survivors.iter().copied().collect();
        let dropped: Vec<EdgeKey> = self.trees[tree]
            .edges
            .keys()
            .filter(|key| !keep.contains(key))
            .collect();
        for edge in dropped {
            self.remove_edge(tree, edge)?;
        }
        for edge in survivors {
            self.add_edge(tree, edge)?;
        }
        Ok(())
    }

    /// Adds a node or an edge, dispatching on the variant.
    pub fn push(&mut self, tree: TreeKey, member: TreeMember) -> Result<()> {
        match member {
            TreeMember::Node(node) => self.add_node(tree, node),
            TreeMember::Edge(edge) => self.add_edge(tree, edge),
        }
    }

    /// Looks an id up among the nodes of `tree`, then among its edges.
    pub fn lookup(&self, tree: TreeKey, id: &str) -> Option<TreeMember> {
        let tree = self.trees.get(tree)?;
        tree.nodes
            .get(id)
            .map(TreeMember::Node)
            .or_else(|| tree.edges.get(id).map(TreeMember::Edge))
    }

    /// True if `member` is a node or an edge of `tree`.
    pub fn includes(&self, tree: TreeKey, member: TreeMember) -> bool {
        match member {
            TreeMember::Node(node) => self.has_node(tree, node),
            TreeMember::Edge(edge) => self.has_edge(tree, edge),
        }
    }

    pub fn has_node(&self, tree: TreeKey, node: NodeKey) -> bool {
        mapper::contains::<TreeNodes, _, _>(&self.trees, &self.nodes, tree, MemberRef::Key(node))
    }

    pub fn has_edge(&self, tree: TreeKey, edge: EdgeKey) -> bool {
        mapper::contains::<TreeEdges, _, _>(&self.trees, &self.edges, tree, MemberRef::Key(edge))
    }

    /// Member nodes flagged as roots, in registration order. May be empty.
    pub fn roots(&self, tree: TreeKey) -> Result<Vec<NodeKey>> {
        let tree = self.tree_entry(tree)?;
        Ok(tree
            .nodes
            .keys()
            .filter(|&key| self.nodes.get(key).is_some_and(|node| node.root))
            .collect())
    }

    /// Gives `tree` a root edge, or removes it with `None`.
    ///
    /// Returns the root edge the tree held before.
    pub fn set_rootedge(
        &mut self,
        tree: TreeKey,
        rootedge: Option<RootEdgeKey>,
    ) -> Result<Option<RootEdgeKey>> {
        let previous =
            mapper::attach_one::<TreeRootEdge, _, _>(&mut self.trees, &mut self.root_edges, tree, rootedge)?;
        debug!(tree = %self.trees[tree].id, "root edge replaced");
        Ok(previous)
    }

    /// Attaches a root edge to `tree` from the root edge's side.
    pub fn set_rootedge_tree(&mut self, rootedge: RootEdgeKey, tree: Option<TreeKey>) -> Result<()> {
        mapper::set_single_owner::<TreeRootEdge, _, _>(
            &mut self.trees,
            &mut self.root_edges,
            rootedge,
            tree,
        )?;
        Ok(())
    }

    /// Points a root edge at `target`, or clears its target with `None`.
    pub fn set_root_edge_target(&mut self, rootedge: RootEdgeKey, target: Option<NodeKey>) -> Result<()> {
        self.root_edge_entry(rootedge)?;
        if let Some(node) = target {
            self.node_entry(node)?;
        }
        self.root_edges[rootedge].target = target;
        Ok(())
    }

    /// Reconnects an edge that is not registered with any tree.
    ///
    /// # Errors
    ///
    /// [`ForestError::EdgeInTree`] while the edge belongs to a tree; remove it first.
    pub fn set_edge_endpoints(
        &mut self,
        edge: EdgeKey,
        source: Option<NodeKey>,
        target: Option<NodeKey>,
    ) -> Result<()> {
        let entity = self.edge_entry(edge)?;
        if let Some(tree) = entity.tree.get() {
            return Err(ForestError::EdgeInTree {
                edge: entity.id.clone(),
                tree: self.tree_entry(tree)?.id.clone(),
            });
        }
        for node in source.into_iter().chain(target) {
            self.node_entry(node)?;
        }

        let entity = &mut self.edges[edge];
        entity.source = source;
        entity.target = target;
        Ok(())
    }

    /// Sets an edge length, coercing it for the numeric tree that owns the edge.
    pub fn set_edge_length(&mut self, edge: EdgeKey, length: impl Into<Length>) -> Result<()> {
        let entity = self.edge_entry(edge)?;
        let length = length.into();
        let length = match entity.tree.get() {
            Some(tree) => length.coerce(self.tree_entry(tree)?.length_kind(), self.length_coercion)?,
            None => length,
        };
        self.edges[edge].distance = length;
        Ok(())
    }

    /// Source and target of `edge`, both validated as members of `tree`.
    fn endpoints_in(&self, tree: TreeKey, edge: &Edge) -> Result<(NodeKey, NodeKey)> {
        let tree_entity = self.tree_entry(tree)?;
        let source = edge.source.ok_or_else(|| ForestError::EndpointMissing {
            edge: edge.id.clone(),
            end: "source",
        })?;
        let target = edge.target.ok_or_else(|| ForestError::EndpointMissing {
            edge: edge.id.clone(),
            end: "target",
        })?;

        for endpoint in [source, target] {
            let node = self.node_entry(endpoint)?;
            if node.tree.get() != Some(tree) {
                return Err(ForestError::EndpointNotInTree {
                    edge: edge.id.clone(),
                    node: node.id.clone(),
                    tree: tree_entity.id.clone(),
                });
            }
        }
        if source == target {
            return Err(ForestError::SelfLoop {
                edge: edge.id.clone(),
                node: self.nodes[source].id.clone(),
            });
        }
        Ok((source, target))
    }
}

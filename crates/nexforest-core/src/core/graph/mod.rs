//! # Structural Graph
//!
//! The structural engine underneath every tree and network: an undirected graph
//! whose vertices and edges carry domain keys, plus the classic single-root
//! relationships (parent, ancestors, descendants, lowest common ancestor)
//! computed relative to one chosen root.
//!
//! The graph itself is unrooted. Rooting is supplied per query, which is what
//! lets a forest answer the same question once for each of its roots.

mod paths;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use slotmap::{Key, SecondaryMap};

/// An undirected graph over domain keys, backed by a `petgraph` stable graph.
///
/// `N` keys identify vertices and `E` keys identify edges. Each key maps to its
/// petgraph index through a [`SecondaryMap`], so lookups stay O(1) and petgraph
/// indices never leak into callers.
#[derive(Debug, Clone)]
pub struct Graph<N: Key, E: Key> {
    inner: StableUnGraph<N, E>,
    node_index: SecondaryMap<N, NodeIndex>,
    edge_index: SecondaryMap<E, EdgeIndex>,
}

impl<N: Key, E: Key> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            inner: StableUnGraph::default(),
            node_index: SecondaryMap::new(),
            edge_index: SecondaryMap::new(),
        }
    }
}

impl<N: Key, E: Key> Graph<N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.node_index.contains_key(node)
    }

    pub fn contains_edge(&self, edge: E) -> bool {
        self.edge_index.contains_key(edge)
    }

    /// Adds a vertex. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.node_index.contains_key(node) {
            return false;
        }
        let index = self.inner.add_node(node);
        self.node_index.insert(node, index);
        true
    }

    /// Removes a vertex together with every edge incident to it.
    ///
    /// # Return
    ///
    /// The keys of the removed incident edges, or `None` if the vertex is absent.
    pub fn remove_node(&mut self, node: N) -> Option<Vec<E>> {
        let index = self.node_index.remove(node)?;
        let mut incident: Vec<E> = self.inner.edges(index).map(|edge| *edge.weight()).collect();
        incident.dedup();
        for edge in &incident {
            self.edge_index.remove(*edge);
        }
        self.inner.remove_node(index);
        Some(incident)
    }

    /// Connects two present vertices with the edge `edge`.
    ///
    /// Re-adding a known edge key moves it to the new endpoints.
    ///
    /// Returns `None` if either vertex is absent.
    pub fn add_edge(&mut self, source: N, target: N, edge: E) -> Option<()> {
        let a = *self.node_index.get(source)?;
        let b = *self.node_index.get(target)?;
        if let Some(existing) = self.edge_index.remove(edge) {
            self.inner.remove_edge(existing);
        }
        let index = self.inner.add_edge(a, b, edge);
        self.edge_index.insert(edge, index);
        Some(())
    }

    /// Removes one edge and returns the vertices it connected.
    pub fn remove_edge(&mut self, edge: E) -> Option<(N, N)> {
        let index = self.edge_index.remove(edge)?;
        let (a, b) = self.inner.edge_endpoints(index)?;
        let endpoints = (self.inner[a], self.inner[b]);
        self.inner.remove_edge(index);
        Some(endpoints)
    }

    /// Returns an edge joining `a` and `b` in either direction.
    pub fn edge_between(&self, a: N, b: N) -> Option<E> {
        let a = *self.node_index.get(a)?;
        let b = *self.node_index.get(b)?;
        self.inner.find_edge(a, b).map(|index| self.inner[index])
    }

    pub fn endpoints(&self, edge: E) -> Option<(N, N)> {
        let index = *self.edge_index.get(edge)?;
        let (a, b) = self.inner.edge_endpoints(index)?;
        Some((self.inner[a], self.inner[b]))
    }

    /// Vertices sharing an edge with `node`, in edge insertion order.
    ///
    /// Returns an empty vector for an absent vertex.
    pub fn adjacent_nodes(&self, node: N) -> Vec<N> {
        match self.node_index.get(node) {
            Some(&index) => self
                .neighbor_indices(index)
                .into_iter()
                .map(|neighbor| self.inner[neighbor])
                .collect(),
            None => Vec::new(),
        }
    }

    fn neighbor_indices(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut incident: Vec<(EdgeIndex, NodeIndex)> = self
            .inner
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other)
            })
            .collect();
        incident.sort_by_key(|(edge, _)| edge.index());

        let mut neighbors = Vec::with_capacity(incident.len());
        for (_, other) in incident {
            if !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }
}

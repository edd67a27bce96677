use super::error::{ForestError, Result};
use crate::core::mapper::DuplicateIdPolicy;
use crate::core::models::document::Document;
use crate::core::models::edge::{Edge, RootEdge};
use crate::core::models::ids::{EdgeKey, NodeKey, OtuKey, OtusKey, RootEdgeKey, TreeKey, TreesKey};
use crate::core::models::node::Node;
use crate::core::models::otu::{Otu, Otus};
use crate::core::models::tree::Tree;
use crate::core::models::trees::Trees;
use slotmap::Key;
use std::collections::{HashMap, HashSet};

impl Document {
    pub(crate) fn tree_entry(&self, key: TreeKey) -> Result<&Tree> {
        self.trees
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "tree" })
    }

    pub(crate) fn node_entry(&self, key: NodeKey) -> Result<&Node> {
        self.nodes
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "node" })
    }

    pub(crate) fn edge_entry(&self, key: EdgeKey) -> Result<&Edge> {
        self.edges
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "edge" })
    }

    pub(crate) fn root_edge_entry(&self, key: RootEdgeKey) -> Result<&RootEdge> {
        self.root_edges
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "root edge" })
    }

    pub(crate) fn trees_entry(&self, key: TreesKey) -> Result<&Trees> {
        self.trees_blocks
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "trees block" })
    }

    pub(crate) fn otu_entry(&self, key: OtuKey) -> Result<&Otu> {
        self.otus
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "otu" })
    }

    pub(crate) fn otus_entry(&self, key: OtusKey) -> Result<&Otus> {
        self.otus_blocks
            .get(key)
            .ok_or(ForestError::UnknownKey { entity: "otus block" })
    }

    /// Applies the duplicate id policy to an occupied id.
    ///
    /// Returns the occupant to evict, or fails under [`DuplicateIdPolicy::Reject`].
    pub(crate) fn claim_id<K>(
        &self,
        occupant: K,
        id: &str,
        container: &'static str,
        owner: &str,
    ) -> Result<K> {
        match self.duplicate_ids {
            DuplicateIdPolicy::Overwrite => Ok(occupant),
            DuplicateIdPolicy::Reject => Err(ForestError::DuplicateId {
                id: id.to_string(),
                container,
                owner: owner.to_string(),
            }),
        }
    }
}

/// Keys that end up registered when `entries` are written one after another.
///
/// The last key written under an id wins and a repeated key counts once. Under
/// [`DuplicateIdPolicy::Reject`] two keys sharing an id fail with that id.
pub(crate) fn surviving<K: Key>(
    entries: &[(K, &str)],
    policy: DuplicateIdPolicy,
) -> std::result::Result<Vec<K>, String> {
    let mut last: HashMap<&str, K> = HashMap::new();
    for &(key, id) in entries {
        if let Some(previous) = last.insert(id, key) {
            if previous != key && policy == DuplicateIdPolicy::Reject {
                return Err(id.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    Ok(entries
        .iter()
        .filter(|&&(key, id)| last.get(id) == Some(&key) && seen.insert(key))
        .map(|&(key, _)| key)
        .collect())
}

use super::ids::{OtusKey, TreeKey};
use crate::core::mapper::{BelongsTo, HasN, Identified};

/// A block of trees and networks describing the taxa of one OTU block.
///
/// Trees and networks live in two registries that share one id namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trees {
    pub(crate) id: String,
    pub label: Option<String>,
    pub(crate) otus: BelongsTo<OtusKey>,
    pub(crate) trees: HasN<TreeKey>,
    pub(crate) networks: HasN<TreeKey>,
}

impl Trees {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            otus: BelongsTo::default(),
            trees: HasN::new(),
            networks: HasN::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn otus(&self) -> Option<OtusKey> {
        self.otus.get()
    }

    pub fn trees(&self) -> &HasN<TreeKey> {
        &self.trees
    }

    pub fn networks(&self) -> &HasN<TreeKey> {
        &self.networks
    }

    pub fn get_tree_by_id(&self, id: &str) -> Option<TreeKey> {
        self.trees.get(id)
    }

    pub fn get_network_by_id(&self, id: &str) -> Option<TreeKey> {
        self.networks.get(id)
    }

    /// Looks a tree up by id, probing trees before networks.
    pub fn get(&self, id: &str) -> Option<TreeKey> {
        self.get_tree_by_id(id)
            .or_else(|| self.get_network_by_id(id))
    }

    pub fn number_of_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn number_of_networks(&self) -> usize {
        self.networks.len()
    }

    /// Trees and networks together.
    pub fn count(&self) -> usize {
        self.number_of_trees() + self.number_of_networks()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Every tree followed by every network, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = TreeKey> + '_ {
        self.trees.keys().chain(self.networks.keys())
    }
}

impl Identified for Trees {
    fn id(&self) -> &str {
        &self.id
    }
}

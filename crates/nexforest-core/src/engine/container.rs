use super::error::{ForestError, Result};
use crate::core::mapper::{self, DuplicateIdPolicy, MapperError, MemberRef, Relation};
use crate::core::models::document::Document;
use crate::core::models::ids::{TreeKey, TreesKey};
use crate::core::models::relations::{TreesNetworks, TreesTrees};
use crate::core::models::tree::{Tree, TreeKind};
use tracing::debug;

impl Document {
    /// Adds a tree to the `trees` registry of a tree block.
    ///
    /// # Errors
    ///
    /// - [`ForestError::TreeKindMismatch`] if `tree` is a network.
    /// - [`ForestError::DuplicateId`] if a network of the block already uses the
    ///   id, whatever the policy, or if a tree does under
    ///   [`DuplicateIdPolicy::Reject`].
    pub fn add_tree(&mut self, trees: TreesKey, tree: TreeKey) -> Result<()> {
        self.attach_to_block(trees, tree, TreeKind::Tree)
    }

    /// Adds a network to the `networks` registry of a tree block.
    pub fn add_network(&mut self, trees: TreesKey, network: TreeKey) -> Result<()> {
        self.attach_to_block(trees, network, TreeKind::Network)
    }

    /// Adds a tree or a network, dispatching on its kind.
    pub fn push_tree(&mut self, trees: TreesKey, tree: TreeKey) -> Result<()> {
        let kind = self.tree_entry(tree)?.kind();
        self.attach_to_block(trees, tree, kind)
    }

    /// Removes a tree from the block by key or by id. Networks are not considered.
    pub fn delete_tree(&mut self, trees: TreesKey, tree: MemberRef<'_, TreeKey>) -> Option<TreeKey> {
        let removed = mapper::remove::<TreesTrees, _, _>(&mut self.trees_blocks, &mut self.trees, trees, tree)?;
        debug!(tree = %self.trees[removed].id, "tree detached from block");
        Some(removed)
    }

    /// Removes a network from the block by key or by id. Trees are not considered.
    pub fn delete_network(
        &mut self,
        trees: TreesKey,
        network: MemberRef<'_, TreeKey>,
    ) -> Option<TreeKey> {
        let removed =
            mapper::remove::<TreesNetworks, _, _>(&mut self.trees_blocks, &mut self.trees, trees, network)?;
        debug!(network = %self.trees[removed].id, "network detached from block");
        Some(removed)
    }

    /// Finds a tree or network of the block by id, probing trees first.
    pub fn lookup_tree(&self, trees: TreesKey, id: &str) -> Option<TreeKey> {
        self.trees_blocks.get(trees)?.get(id)
    }

    /// True if `tree` is one of the block's trees or networks.
    pub fn includes_tree(&self, trees: TreesKey, tree: TreeKey) -> bool {
        mapper::contains::<TreesTrees, _, _>(&self.trees_blocks, &self.trees, trees, MemberRef::Key(tree))
            || mapper::contains::<TreesNetworks, _, _>(
                &self.trees_blocks,
                &self.trees,
                trees,
                MemberRef::Key(tree),
            )
    }

    /// The block's trees followed by its networks, resolved to the entity.
    pub fn each_tree(&self, trees: TreesKey) -> impl Iterator<Item = (TreeKey, &Tree)> {
        self.trees_blocks
            .get(trees)
            .into_iter()
            .flat_map(|block| block.iter())
            .filter_map(|key| self.trees.get(key).map(|tree| (key, tree)))
    }

    fn attach_to_block(&mut self, trees: TreesKey, tree: TreeKey, expected: TreeKind) -> Result<()> {
        let block = self.trees_entry(trees)?;
        let entity = self.tree_entry(tree)?;
        if entity.kind() != expected {
            return Err(ForestError::TreeKindMismatch {
                id: entity.id.clone(),
                expected,
                actual: entity.kind(),
            });
        }
        if entity.id.is_empty() {
            return Err(MapperError::MissingId {
                relation: TreesTrees::NAME,
            }
            .into());
        }
        if entity.container.get() == Some(trees) {
            return Ok(());
        }

        let (own, other) = match expected {
            TreeKind::Tree => (&block.trees, &block.networks),
            TreeKind::Network => (&block.networks, &block.trees),
        };
        if other.contains_id(&entity.id) {
            return Err(ForestError::DuplicateId {
                id: entity.id.clone(),
                container: "trees block",
                owner: block.id.clone(),
            });
        }
        if let Some(occupant) = own.get(&entity.id) {
            self.claim_id(occupant, &entity.id, "trees block", &block.id)?;
        }

        let (block_id, tree_id) = (block.id.clone(), entity.id.clone());
        match expected {
            TreeKind::Tree => mapper::add::<TreesTrees, _, _>(
                &mut self.trees_blocks,
                &mut self.trees,
                trees,
                tree,
                DuplicateIdPolicy::Overwrite,
            )?,
            TreeKind::Network => mapper::add::<TreesNetworks, _, _>(
                &mut self.trees_blocks,
                &mut self.trees,
                trees,
                tree,
                DuplicateIdPolicy::Overwrite,
            )?,
        };
        debug!(block = %block_id, tree = %tree_id, kind = %expected, "tree attached to block");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::options::{OtusOptions, TreeOptions, TreesOptions};
    use crate::core::models::tree::TreeType;
    use crate::engine::config::DocumentConfigBuilder;

    struct BlockRefs {
        block: TreesKey,
        tree1: TreeKey,
        network1: TreeKey,
    }

    fn create_block(doc: &mut Document) -> BlockRefs {
        let tree1 = doc.create_tree("t1", TreeOptions::new()).unwrap();
        let network1 = doc
            .create_tree("n1", TreeOptions::new().tree_type(TreeType::NETWORK))
            .unwrap();
        let block = doc
            .create_trees("trees1", TreesOptions::new().trees([tree1, network1]))
            .unwrap();
        BlockRefs {
            block,
            tree1,
            network1,
        }
    }

    #[test]
    fn lookup_and_count_span_both_registries() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let block = doc.trees_block(refs.block).unwrap();

        assert_eq!(doc.lookup_tree(refs.block, "t1"), Some(refs.tree1));
        assert_eq!(doc.lookup_tree(refs.block, "n1"), Some(refs.network1));
        assert_eq!(doc.lookup_tree(refs.block, "x"), None);
        assert_eq!(block.count(), 2);
        assert_eq!(block.number_of_trees(), 1);
        assert_eq!(block.number_of_networks(), 1);
        assert_eq!(block.get_network_by_id("n1"), Some(refs.network1));
        assert!(block.get_tree_by_id("n1").is_none());
    }

    #[test]
    fn each_visits_trees_then_networks() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let tree2 = doc.create_tree("t2", TreeOptions::new()).unwrap();
        doc.push_tree(refs.block, tree2).unwrap();

        let ids: Vec<&str> = doc.each_tree(refs.block).map(|(_, tree)| tree.id()).collect();
        assert_eq!(ids, ["t1", "t2", "n1"]);
        assert!(doc.includes_tree(refs.block, refs.network1));
        assert_eq!(doc.tree(tree2).unwrap().container(), Some(refs.block));
    }

    #[test]
    fn add_tree_refuses_networks_and_vice_versa() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let network2 = doc
            .create_tree("n2", TreeOptions::new().tree_type(TreeType::FLOAT_NETWORK))
            .unwrap();
        let tree2 = doc.create_tree("t2", TreeOptions::new()).unwrap();

        assert_eq!(
            doc.add_tree(refs.block, network2),
            Err(ForestError::TreeKindMismatch {
                id: "n2".to_string(),
                expected: TreeKind::Tree,
                actual: TreeKind::Network,
            })
        );
        assert!(matches!(
            doc.add_network(refs.block, tree2),
            Err(ForestError::TreeKindMismatch { .. })
        ));
    }

    #[test]
    fn ids_are_unique_across_trees_and_networks() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let clash = doc
            .create_tree("t1", TreeOptions::new().tree_type(TreeType::NETWORK))
            .unwrap();

        assert!(matches!(
            doc.add_network(refs.block, clash),
            Err(ForestError::DuplicateId { .. })
        ));
        assert_eq!(doc.lookup_tree(refs.block, "t1"), Some(refs.tree1));
        assert!(doc.tree(clash).unwrap().container().is_none());
    }

    #[test]
    fn duplicate_tree_id_follows_policy() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let twin = doc.create_tree("t1", TreeOptions::new()).unwrap();
        doc.add_tree(refs.block, twin).unwrap();

        assert_eq!(doc.lookup_tree(refs.block, "t1"), Some(twin));
        assert!(doc.tree(refs.tree1).unwrap().container().is_none());

        let config = DocumentConfigBuilder::new()
            .duplicate_ids(DuplicateIdPolicy::Reject)
            .build();
        let mut strict = Document::with_config(config);
        let refs = create_block(&mut strict);
        let twin = strict.create_tree("t1", TreeOptions::new()).unwrap();
        assert!(matches!(
            strict.add_tree(refs.block, twin),
            Err(ForestError::DuplicateId { .. })
        ));
    }

    #[test]
    fn delete_by_key_or_id_unlinks_container() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);

        assert_eq!(doc.delete_tree(refs.block, MemberRef::Id("t1")), Some(refs.tree1));
        assert_eq!(doc.delete_tree(refs.block, MemberRef::Id("n1")), None);
        assert_eq!(
            doc.delete_network(refs.block, MemberRef::Key(refs.network1)),
            Some(refs.network1)
        );
        assert!(doc.trees_block(refs.block).unwrap().is_empty());
        assert!(doc.tree(refs.tree1).unwrap().container().is_none());
        assert!(doc.tree(refs.network1).unwrap().container().is_none());
    }

    #[test]
    fn moving_a_tree_between_blocks() {
        let mut doc = Document::new();
        let refs = create_block(&mut doc);
        let other = doc.create_trees("trees2", TreesOptions::new()).unwrap();

        doc.add_tree(other, refs.tree1).unwrap();

        assert!(!doc.includes_tree(refs.block, refs.tree1));
        assert!(doc.includes_tree(other, refs.tree1));
        assert_eq!(doc.trees_block(refs.block).unwrap().count(), 1);
    }

    #[test]
    fn trees_block_links_to_its_otus() {
        let mut doc = Document::new();
        let otus = doc.create_otus("taxa", OtusOptions::new()).unwrap();
        let block = doc
            .create_trees("trees1", TreesOptions::new().otus(otus))
            .unwrap();

        assert_eq!(doc.trees_block(block).unwrap().otus(), Some(otus));
        assert_eq!(doc.otus_block(otus).unwrap().trees().to_vec(), vec![block]);

        doc.set_trees_otus(block, None).unwrap();
        assert!(doc.otus_block(otus).unwrap().trees().is_empty());
    }
}

//! Wiring between nodes, OTUs, OTU blocks and tree blocks.
//!
//! A node linked to an OTU mirrors the OTU id in its `taxonomy_id`. Every
//! operation here that links or unlinks a node keeps that mirror current,
//! including nodes evicted by a duplicate id.

use super::error::Result;
use crate::core::mapper::{self, MemberRef};
use crate::core::models::document::Document;
use crate::core::models::ids::{NodeKey, OtuKey, OtusKey, TreesKey};
use crate::core::models::relations::{OtuNodes, OtusOtu, OtusTrees};
use tracing::trace;

impl Document {
    /// Points `node` at `otu`, or unlinks it with `None`.
    pub fn set_node_otu(&mut self, node: NodeKey, otu: Option<OtuKey>) -> Result<()> {
        self.node_entry(node)?;
        if let Some(otu) = otu {
            self.otu_entry(otu)?;
        }

        let evicted = mapper::set_owner::<OtuNodes, _, _>(
            &mut self.otus,
            &mut self.nodes,
            node,
            otu,
            self.duplicate_ids,
        )?;
        self.sync_taxonomy(node);
        if let Some(evicted) = evicted {
            self.sync_taxonomy(evicted);
        }
        Ok(())
    }

    /// Adds `node` to the nodes representing `otu`. Same effect as [`Document::set_node_otu`].
    pub fn add_otu_node(&mut self, otu: OtuKey, node: NodeKey) -> Result<()> {
        self.set_node_otu(node, Some(otu))
    }

    /// Unlinks a node from `otu` by key or by id and clears its taxonomy id.
    ///
    /// Returns the unlinked node, or `None` if `otu` does not hold it.
    pub fn remove_otu_node(&mut self, otu: OtuKey, node: MemberRef<'_, NodeKey>) -> Option<NodeKey> {
        let removed = mapper::remove::<OtuNodes, _, _>(&mut self.otus, &mut self.nodes, otu, node)?;
        self.sync_taxonomy(removed);
        Some(removed)
    }

    /// Makes `nodes` the exact set of nodes representing `otu`.
    pub fn set_otu_nodes(&mut self, otu: OtuKey, nodes: &[NodeKey]) -> Result<()> {
        let dropped = mapper::replace::<OtuNodes, _, _>(
            &mut self.otus,
            &mut self.nodes,
            otu,
            nodes,
            self.duplicate_ids,
        )?;
        for &node in nodes.iter().chain(&dropped) {
            self.sync_taxonomy(node);
        }
        Ok(())
    }

    /// Declares `otu` in the OTU block `otus`, or removes it from its block with `None`.
    pub fn set_otu_otus(&mut self, otu: OtuKey, otus: Option<OtusKey>) -> Result<()> {
        self.otu_entry(otu)?;
        if let Some(otus) = otus {
            self.otus_entry(otus)?;
        }
        mapper::set_owner::<OtusOtu, _, _>(
            &mut self.otus_blocks,
            &mut self.otus,
            otu,
            otus,
            self.duplicate_ids,
        )?;
        Ok(())
    }

    /// Adds `otu` to the OTU block `otus`.
    pub fn add_otu(&mut self, otus: OtusKey, otu: OtuKey) -> Result<()> {
        self.set_otu_otus(otu, Some(otus))
    }

    /// Removes an OTU from `otus` by key or by id.
    pub fn remove_otu(&mut self, otus: OtusKey, otu: MemberRef<'_, OtuKey>) -> Option<OtuKey> {
        mapper::remove::<OtusOtu, _, _>(&mut self.otus_blocks, &mut self.otus, otus, otu)
    }

    /// Links the tree block `trees` to the OTU block whose taxa it describes.
    pub fn set_trees_otus(&mut self, trees: TreesKey, otus: Option<OtusKey>) -> Result<()> {
        self.trees_entry(trees)?;
        if let Some(otus) = otus {
            self.otus_entry(otus)?;
        }
        mapper::set_owner::<OtusTrees, _, _>(
            &mut self.otus_blocks,
            &mut self.trees_blocks,
            trees,
            otus,
            self.duplicate_ids,
        )?;
        Ok(())
    }

    fn sync_taxonomy(&mut self, node: NodeKey) {
        let Some(entity) = self.nodes.get(node) else {
            return;
        };
        let taxonomy_id = entity
            .otu
            .get()
            .and_then(|otu| self.otus.get(otu))
            .map(|otu| otu.id.clone());
        trace!(node = %entity.id, taxonomy_id = ?taxonomy_id, "taxonomy id synced");
        self.nodes[node].taxonomy_id = taxonomy_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::options::{NodeOptions, OtuOptions, OtusOptions};

    struct TaxaRefs {
        otus: OtusKey,
        human: OtuKey,
        chimp: OtuKey,
        node: NodeKey,
    }

    fn create_taxa() -> (Document, TaxaRefs) {
        let mut doc = Document::new();
        let otus = doc.create_otus("taxa", OtusOptions::new()).unwrap();
        let human = doc
            .create_otu("human", OtuOptions::new().label("Homo sapiens").otus(otus))
            .unwrap();
        let chimp = doc.create_otu("chimp", OtuOptions::new().otus(otus)).unwrap();
        let node = doc
            .create_node("n1", NodeOptions::new().otu(human))
            .unwrap();
        (
            doc,
            TaxaRefs {
                otus,
                human,
                chimp,
                node,
            },
        )
    }

    #[test]
    fn linking_a_node_mirrors_the_otu_id() {
        let (doc, refs) = create_taxa();
        let node = doc.node(refs.node).unwrap();

        assert_eq!(node.otu(), Some(refs.human));
        assert_eq!(node.taxonomy_id(), Some("human"));
        assert_eq!(doc.otu(refs.human).unwrap().nodes().to_vec(), vec![refs.node]);
    }

    #[test]
    fn relinking_moves_the_node_and_updates_taxonomy() {
        let (mut doc, refs) = create_taxa();
        doc.set_node_otu(refs.node, Some(refs.chimp)).unwrap();

        assert!(doc.otu(refs.human).unwrap().nodes().is_empty());
        assert_eq!(doc.otu(refs.chimp).unwrap().nodes().get("n1"), Some(refs.node));
        assert_eq!(doc.node(refs.node).unwrap().taxonomy_id(), Some("chimp"));
    }

    #[test]
    fn linking_from_the_otu_side_is_equivalent() {
        let (mut doc, refs) = create_taxa();
        let other = doc.create_node("n2", NodeOptions::new()).unwrap();
        doc.add_otu_node(refs.chimp, other).unwrap();

        assert_eq!(doc.node(other).unwrap().otu(), Some(refs.chimp));
        assert_eq!(doc.node(other).unwrap().taxonomy_id(), Some("chimp"));
    }

    #[test]
    fn unlinking_clears_taxonomy() {
        let (mut doc, refs) = create_taxa();
        let removed = doc.remove_otu_node(refs.human, MemberRef::Id("n1"));

        assert_eq!(removed, Some(refs.node));
        assert!(doc.node(refs.node).unwrap().otu().is_none());
        assert!(doc.node(refs.node).unwrap().taxonomy_id().is_none());
        assert!(doc.remove_otu_node(refs.human, MemberRef::Id("n1")).is_none());
    }

    #[test]
    fn evicted_node_loses_taxonomy() {
        let (mut doc, refs) = create_taxa();
        let twin = doc.create_node("n1", NodeOptions::new()).unwrap();
        doc.set_node_otu(twin, Some(refs.human)).unwrap();

        assert_eq!(doc.node(twin).unwrap().taxonomy_id(), Some("human"));
        assert!(doc.node(refs.node).unwrap().otu().is_none());
        assert!(doc.node(refs.node).unwrap().taxonomy_id().is_none());
    }

    #[test]
    fn bulk_writer_syncs_kept_and_dropped_nodes() {
        let (mut doc, refs) = create_taxa();
        let other = doc.create_node("n2", NodeOptions::new()).unwrap();
        doc.set_otu_nodes(refs.human, &[other]).unwrap();

        assert_eq!(doc.node(other).unwrap().taxonomy_id(), Some("human"));
        assert!(doc.node(refs.node).unwrap().taxonomy_id().is_none());
    }

    #[test]
    fn otus_block_membership() {
        let (mut doc, refs) = create_taxa();
        let block = doc.otus_block(refs.otus).unwrap();
        assert_eq!(block.otus().to_vec(), vec![refs.human, refs.chimp]);
        assert_eq!(doc.otu(refs.human).unwrap().otus(), Some(refs.otus));

        assert_eq!(doc.remove_otu(refs.otus, MemberRef::Key(refs.chimp)), Some(refs.chimp));
        assert!(doc.otu(refs.chimp).unwrap().otus().is_none());

        doc.set_otu_otus(refs.human, None).unwrap();
        assert!(doc.otus_block(refs.otus).unwrap().otus().is_empty());
    }
}

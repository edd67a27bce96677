use super::ids::{NodeKey, OtuKey, OtusKey, TreesKey};
use crate::core::mapper::{BelongsTo, HasN, Identified};

/// An operational taxonomic unit that nodes may refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otu {
    pub(crate) id: String,
    pub label: Option<String>,
    pub(crate) otus: BelongsTo<OtusKey>,
    pub(crate) nodes: HasN<NodeKey>,
}

impl Otu {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            otus: BelongsTo::default(),
            nodes: HasN::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The OTU block this OTU belongs to.
    pub fn otus(&self) -> Option<OtusKey> {
        self.otus.get()
    }

    /// Nodes that link to this OTU, in link order.
    pub fn nodes(&self) -> &HasN<NodeKey> {
        &self.nodes
    }
}

impl Identified for Otu {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A block of OTUs. Tree blocks refer to the OTU block whose taxa they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otus {
    pub(crate) id: String,
    pub label: Option<String>,
    pub(crate) otus: HasN<OtuKey>,
    pub(crate) trees: HasN<TreesKey>,
}

impl Otus {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            otus: HasN::new(),
            trees: HasN::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn otus(&self) -> &HasN<OtuKey> {
        &self.otus
    }

    /// Tree blocks linked to this OTU block.
    pub fn trees(&self) -> &HasN<TreesKey> {
        &self.trees
    }
}

impl Identified for Otus {
    fn id(&self) -> &str {
        &self.id
    }
}

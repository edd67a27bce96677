use thiserror::Error;

use crate::core::mapper::MapperError;
use crate::core::models::length::LengthError;
use crate::core::models::tree::TreeKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("Unknown {entity} key")]
    UnknownKey { entity: &'static str },

    #[error("{entity} '{id}' is not a member of tree '{tree}'")]
    NotFound {
        entity: &'static str,
        id: String,
        tree: String,
    },

    #[error("Tree '{tree}' has no roots")]
    NoRoots { tree: String },

    #[error("Node '{node}' is not a member of tree '{tree}'")]
    NodeNotInTree { node: String, tree: String },

    #[error("Edge '{edge}' has no {end} node")]
    EndpointMissing { edge: String, end: &'static str },

    #[error("Edge '{edge}' refers to node '{node}', which is not a member of tree '{tree}'")]
    EndpointNotInTree {
        edge: String,
        node: String,
        tree: String,
    },

    #[error("Edge '{edge}' connects node '{node}' to itself")]
    SelfLoop { edge: String, node: String },

    #[error("Edge '{edge}' would duplicate edge '{existing}' in tree '{tree}'")]
    ParallelEdge {
        edge: String,
        existing: String,
        tree: String,
    },

    #[error("Id '{id}' is already taken in {container} '{owner}'")]
    DuplicateId {
        id: String,
        container: &'static str,
        owner: String,
    },

    #[error("'{id}' is a {actual}, expected a {expected}")]
    TreeKindMismatch {
        id: String,
        expected: TreeKind,
        actual: TreeKind,
    },

    #[error("Edge '{edge}' belongs to tree '{tree}' and cannot be reconnected")]
    EdgeInTree { edge: String, tree: String },

    #[error("Invalid edge length: {source}")]
    Length {
        #[from]
        source: LengthError,
    },

    #[error("Relation update failed: {source}")]
    Mapper {
        #[from]
        source: MapperError,
    },
}

pub type Result<T> = std::result::Result<T, ForestError>;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapperError {
    #[error("Relation {relation}: member has an empty id")]
    MissingId { relation: &'static str },

    #[error("Relation {relation}: owner key does not resolve to a live entity")]
    DanglingOwner { relation: &'static str },

    #[error("Relation {relation}: member key does not resolve to a live entity")]
    DanglingMember { relation: &'static str },

    #[error("Relation {relation}: id '{id}' is already taken by another member")]
    DuplicateId { relation: &'static str, id: String },
}

//! # Core Module
//!
//! The building blocks of the document model, free of any document-wide policy.
//!
//! - **Relation Mapper** ([`mapper`]) - Declared two-sided associations between arena entities
//! - **Structural Graph** ([`graph`]) - Undirected graph with single-root traversal primitives
//! - **Document Models** ([`models`]) - Keys, entities, lengths, options and the `Document` arena

pub mod graph;
pub mod mapper;
pub mod models;

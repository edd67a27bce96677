//! # Core Models Module
//!
//! The entities of a NeXML document and the arena that owns them.
//!
//! ## Key Components
//!
//! - [`document`] - The `Document` arena holding every entity
//! - [`node`] - Tree nodes with their root flag and OTU link
//! - [`edge`] - Edges and source-less root edges, with the [`edge::Weighted`] length view
//! - [`tree`] - Trees and networks with their node and edge registries
//! - [`trees`] - Tree blocks grouping trees and networks
//! - [`otu`] - OTUs and OTU blocks
//! - [`length`] - Edge length values and their numeric coercion
//! - [`relations`] - Declarations of every association between the entities
//! - [`options`] - Construction options for each entity
//! - [`ids`] - Typed arena keys

pub mod document;
pub mod edge;
pub mod ids;
pub mod length;
pub mod node;
pub mod options;
pub mod otu;
pub mod relations;
pub mod tree;
pub mod trees;

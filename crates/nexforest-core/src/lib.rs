//! # nexforest
//!
//! An in-memory model of NeXML phylogenetic forests: multi-rooted trees and
//! networks whose nodes refer to operational taxonomic units, grouped into tree
//! blocks, with every two-sided association kept consistent by a declarative
//! relation mapper.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The generic relation mapper, the structural
//!   graph that answers single-root questions, and the entity models stored in a
//!   [`Document`](core::models::document::Document) arena.
//!
//! - **[`engine`]: The Operations.** Everything that mutates or queries a
//!   document as a whole: building entities from options, wiring relations,
//!   adding and removing tree members, per-root traversals and tree blocks. It
//!   also holds the error taxonomy and the document configuration.
//!
//! ```ignore
//! use nexforest::core::models::document::Document;
//! use nexforest::core::models::options::{EdgeOptions, NodeOptions, TreeOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.create_node("n1", NodeOptions::new().root(true))?;
//! let leaf = doc.create_node("n2", NodeOptions::new())?;
//! let edge = doc.create_edge("e1", EdgeOptions::new().source(root).target(leaf))?;
//! let tree = doc.create_tree("t1", TreeOptions::new().nodes([root, leaf]).edges([edge]))?;
//!
//! let parents = doc.parent(tree, leaf, None)?;
//! assert_eq!(parents.get(root), Some(&Some(root)));
//! ```

pub mod core;
pub mod engine;

//! # Engine Module
//!
//! The operations over a [`Document`](crate::core::models::document::Document).
//! Each submodule adds one family of methods to the document:
//!
//! - **Construction** ([`build`]) - `create_*` and `create_*_with` from option structs
//! - **Lifecycle** ([`lifecycle`]) - `destroy_*`, severing every reference before removal
//! - **Forest Operations** ([`forest`]) - Node and edge membership of trees and networks
//! - **Traversal** ([`traversal`]) - Parent, children, ancestors, descendants and LCA per root
//! - **Tree Blocks** ([`container`]) - Trees and networks grouped in a `Trees` block
//! - **Taxa Wiring** ([`links`]) - Node to OTU links and the OTU block relations
//! - **Configuration** ([`config`]) - Document-wide policies, loadable from TOML
//! - **Error Handling** ([`error`]) - The [`ForestError`](error::ForestError) taxonomy

mod access;
pub mod build;
pub mod config;
pub mod container;
pub mod error;
pub mod forest;
pub mod lifecycle;
pub mod links;
pub mod traversal;

#[cfg(test)]
mod fixtures;

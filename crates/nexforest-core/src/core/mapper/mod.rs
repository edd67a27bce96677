//! # Relation Mapper
//!
//! A small declarative framework for keeping two-sided associations between
//! arena-stored entities consistent.
//!
//! ## Overview
//!
//! Entities live in [`slotmap::SlotMap`]s and refer to each other by key. A
//! relation is declared once with the [`relation!`](crate::relation) macro:
//!
//! - **`has_n`**: the owner keeps an insertion-ordered, id-indexed [`HasN`]
//!   collection, each member keeps a [`BelongsTo`] back reference.
//! - **`has_one`**: the owner keeps a single [`HasOne`] slot, the member keeps a
//!   [`BelongsTo`] back reference.
//!
//! The free functions in this module ([`add`], [`remove`], [`contains`],
//! [`set_owner`], [`replace`], [`attach_one`], [`set_single_owner`]) are the only
//! way the two sides are mutated, so establishing or breaking a link from either
//! side always leaves both sides agreeing.

mod collection;
mod error;
mod ops;
mod relation;

pub use collection::{BelongsTo, HasN, HasOne, Slot};
pub use error::MapperError;
pub use ops::{
    DuplicateIdPolicy, MemberRef, add, attach_one, contains, remove, replace, set_owner,
    set_single_owner,
};
pub use relation::{Identified, Member, Owner, Relation, SingleOwner};

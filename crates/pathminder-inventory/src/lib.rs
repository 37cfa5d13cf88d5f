//! # PathMinder Inventory
//!
//! Hierarchical inventory for PathMinder. Items may be containers holding
//! other items, arranged as a strict tree:
//! - every item is held by at most one container
//! - no container holds itself, directly or further down
//! - a container's total weight stays within its capacity plus its own weight
//!
//! All items live in an [`Inventory`] arena and are addressed by
//! [`ItemId`] handles. Membership, size and weight queries recurse through
//! nested containers; [`Cursor`] and [`Iter`] walk a container's contents in
//! pre-order.
//!
//! Bulk insertion, bulk removal and clearing are deliberately absent. Loop
//! over [`Inventory::add`] / [`Inventory::remove`] instead; each call is
//! all-or-nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod arena;
pub mod config;
pub mod container;
pub mod cursor;
pub mod error;
pub mod item;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::arena::*;
    pub use crate::config::*;
    pub use crate::cursor::*;
    pub use crate::error::*;
    pub use crate::item::*;
    pub use pathminder_common::ItemId;
}

pub use prelude::*;

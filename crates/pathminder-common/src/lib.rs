//! # PathMinder Common
//!
//! Common types and utilities shared by the PathMinder crates:
//! - Item ID type
//! - Configuration error types
//! - TOML configuration helpers
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

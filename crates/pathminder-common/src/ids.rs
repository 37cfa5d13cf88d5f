//! ID types for items and containers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for item IDs.
static ITEM_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an item (or container) in an inventory.
///
/// IDs are allocated from a process-wide counter, so two items never share an
/// ID even when they live in different inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new unique item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ITEM_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates an item ID from a raw value (for deserialization).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid item ID. Never handed out by [`ItemId::new`].
    pub const NULL: Self = Self(0);

    /// Checks if this is a valid (non-null) item ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

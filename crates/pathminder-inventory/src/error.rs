//! Inventory error types.

use pathminder_common::ItemId;
use thiserror::Error;

/// Errors raised by inventory, container and cursor operations.
///
/// Every failing operation leaves the inventory exactly as it was before the
/// call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    /// Inserting would push a container over its weight limit.
    #[error("Container {container} would weigh {attempted}, limit is {max}")]
    CapacityExceeded {
        /// Container whose limit would be exceeded
        container: ItemId,
        /// Total weight the insertion would produce
        attempted: f32,
        /// Maximum total weight of the container
        max: f32,
    },
    /// Inserting would make a container hold itself.
    #[error("Cannot place {item} inside {container}: it would contain itself")]
    CyclicContainment {
        /// Container being inserted into
        container: ItemId,
        /// Item being inserted
        item: ItemId,
    },
    /// Handle does not refer to a live item in this inventory.
    #[error("Invalid item handle: {0}")]
    InvalidArgument(ItemId),
    /// A container operation was called on a plain item.
    #[error("{0} is not a container")]
    NotAContainer(ItemId),
    /// Item already has an owning container.
    #[error("{item} is already held by {owner}")]
    AlreadyContained {
        /// The owned item
        item: ItemId,
        /// Its current container
        owner: ItemId,
    },
    /// Weight, cost or capacity is negative or not finite.
    #[error("Invalid {field}: {value}")]
    InvalidSpec {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },
    /// The tree under a cursor changed since the cursor was created.
    #[error("Container {container} was modified during traversal")]
    ConcurrentModification {
        /// Root container of the cursor
        container: ItemId,
    },
    /// Cursor stepped past its last element.
    #[error("Cursor exhausted")]
    Exhausted,
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

//! Depth-first traversal over a container's contents.
//!
//! Two flavours are provided:
//!
//! - [`Iter`] borrows the inventory and implements [`Iterator`]. The borrow
//!   checker rules out mutation while it is alive, so it needs no runtime
//!   checks.
//! - [`Cursor`] holds no borrow. Each step takes `&Inventory`, so a caller can
//!   mutate the inventory between steps. A cursor remembers the root
//!   container's modification counter and fails with
//!   [`InventoryError::ConcurrentModification`] once it changes. This is a
//!   same-thread safety net for interleaved mutation; it is not a
//!   synchronisation primitive and makes no thread-safety promises.
//!
//! Both yield every item inside the root in pre-order: a container is yielded
//! before anything it holds.

use std::iter::FusedIterator;

use pathminder_common::ItemId;

use crate::arena::Inventory;
use crate::error::{InventoryError, InventoryResult};

/// Fail-fast, resumable pre-order cursor over a container's contents.
///
/// Not restartable: create a fresh cursor with [`Inventory::cursor`] to
/// traverse again.
#[derive(Debug, Clone)]
pub struct Cursor {
    root: ItemId,
    /// Index of the next direct child of `root`
    position: usize,
    expected_mod_count: u64,
    /// Cursor over the child container currently being drained
    nested: Option<Box<Cursor>>,
}

impl Cursor {
    fn new(inventory: &Inventory, root: ItemId) -> InventoryResult<Self> {
        let contents = inventory.contents(root)?;
        Ok(Self {
            root,
            position: 0,
            expected_mod_count: contents.mod_count,
            nested: None,
        })
    }

    /// Container this cursor traverses.
    #[must_use]
    pub const fn root(&self) -> ItemId {
        self.root
    }

    /// Returns the root's direct children, or fails if the tree changed since
    /// the cursor was created.
    fn check<'a>(&self, inventory: &'a Inventory) -> InventoryResult<&'a [ItemId]> {
        match inventory.contents(self.root) {
            Ok(contents) if contents.mod_count == self.expected_mod_count => {
                Ok(&contents.children)
            }
            _ => Err(InventoryError::ConcurrentModification {
                container: self.root,
            }),
        }
    }

    /// Returns true if another item remains.
    pub fn has_next(&self, inventory: &Inventory) -> InventoryResult<bool> {
        let children = self.check(inventory)?;
        if let Some(nested) = &self.nested {
            if nested.has_next(inventory)? {
                return Ok(true);
            }
        }
        Ok(self.position < children.len())
    }

    /// Returns the next item, descending into child containers after
    /// yielding them.
    pub fn next(&mut self, inventory: &Inventory) -> InventoryResult<ItemId> {
        let children = self.check(inventory)?;

        if let Some(nested) = self.nested.as_mut() {
            if nested.has_next(inventory)? {
                return nested.next(inventory);
            }
            self.nested = None;
        }

        let Some(&item) = children.get(self.position) else {
            return Err(InventoryError::Exhausted);
        };
        self.position += 1;

        if inventory.get(item)?.is_container() {
            self.nested = Some(Box::new(Self::new(inventory, item)?));
        }
        Ok(item)
    }
}

/// Borrowing pre-order iterator over a container's contents.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inventory: &'a Inventory,
    stack: Vec<std::slice::Iter<'a, ItemId>>,
}

impl<'a> Iter<'a> {
    fn new(inventory: &'a Inventory, children: &'a [ItemId]) -> Self {
        Self {
            inventory,
            stack: vec![children.iter()],
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        let inventory = self.inventory;
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(&id) => {
                    if let Ok(contents) = inventory.contents(id) {
                        self.stack.push(contents.children.iter());
                    }
                    return Some(id);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}

impl Inventory {
    /// Creates a fail-fast cursor over everything inside `container`.
    pub fn cursor(&self, container: ItemId) -> InventoryResult<Cursor> {
        Cursor::new(self, container)
    }

    /// Iterates over everything inside `container` in pre-order.
    pub fn iter(&self, container: ItemId) -> InventoryResult<Iter<'_>> {
        Ok(Iter::new(self, &self.contents(container)?.children))
    }

    /// Collects everything inside `container` in pre-order. The result has
    /// `size(container)` elements.
    pub fn to_vec(&self, container: ItemId) -> InventoryResult<Vec<ItemId>> {
        Ok(self.iter(container)?.collect())
    }

    /// Pre-order walk below any item; empty for plain items.
    pub(crate) fn iter_subtree(&self, id: ItemId) -> Iter<'_> {
        let children = self.get(id).map(|item| item.children()).unwrap_or_default();
        Iter::new(self, children)
    }
}

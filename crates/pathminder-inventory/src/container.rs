//! Container membership, mutation and weight queries.
//!
//! Containers form a strict tree: each item sits in at most one container and
//! no container holds itself, directly or further down. A container's total
//! weight (itself plus everything inside it) never exceeds
//! `capacity + own weight`. Every query here walks the tree on each call;
//! nothing is cached.

use pathminder_common::ItemId;
use tracing::{debug, trace};

use crate::arena::Inventory;
use crate::error::{InventoryError, InventoryResult};

impl Inventory {
    /// Total weight of an item: its own weight plus, for containers, the total
    /// weight of every direct child.
    pub fn weight(&self, id: ItemId) -> InventoryResult<f32> {
        let item = self.get(id)?;
        let mut total = item.weight();
        for &child in item.children() {
            total += self.weight(child)?;
        }
        Ok(total)
    }

    /// Sums the total weight of a collection of items.
    pub fn total_weight<I>(&self, ids: I) -> InventoryResult<f32>
    where
        I: IntoIterator<Item = ItemId>,
    {
        ids.into_iter().map(|id| self.weight(id)).sum()
    }

    /// Number of items inside a container, at any depth. The container itself
    /// is not counted.
    pub fn size(&self, container: ItemId) -> InventoryResult<usize> {
        let contents = self.contents(container)?;
        let mut size = contents.children.len();
        for &child in &contents.children {
            if self.get(child)?.is_container() {
                size += self.size(child)?;
            }
        }
        Ok(size)
    }

    /// Returns true if the container has no direct children.
    pub fn is_empty_container(&self, container: ItemId) -> InventoryResult<bool> {
        Ok(self.contents(container)?.children.is_empty())
    }

    /// Direct children of a container in insertion order.
    pub fn children(&self, container: ItemId) -> InventoryResult<&[ItemId]> {
        Ok(&self.contents(container)?.children)
    }

    /// Content capacity of a container, excluding its own weight.
    pub fn capacity(&self, container: ItemId) -> InventoryResult<f32> {
        Ok(self.contents(container)?.capacity)
    }

    /// Bound on a container's total weight: capacity plus its own weight.
    pub fn max_weight(&self, container: ItemId) -> InventoryResult<f32> {
        Ok(self.contents(container)?.max_weight)
    }

    /// Current modification counter of a container.
    pub fn mod_count(&self, container: ItemId) -> InventoryResult<u64> {
        Ok(self.contents(container)?.mod_count)
    }

    /// Returns true if `target` is a direct child of `container` or sits
    /// anywhere inside one of its child containers.
    ///
    /// A container never contains itself. Unknown handles and plain items
    /// contain nothing.
    #[must_use]
    pub fn contains(&self, container: ItemId, target: ItemId) -> bool {
        let Ok(contents) = self.contents(container) else {
            return false;
        };
        if contents.children.contains(&target) {
            return true;
        }
        contents
            .children
            .iter()
            .any(|&child| self.contains(child, target))
    }

    /// Returns true if every target is contained in `container`.
    ///
    /// The empty collection is always contained. Fails with
    /// [`InventoryError::InvalidArgument`] if any target is not a live item.
    pub fn contains_all<I>(&self, container: ItemId, targets: I) -> InventoryResult<bool>
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.contents(container)?;
        let targets: Vec<ItemId> = targets.into_iter().collect();
        for &target in &targets {
            self.get(target)?;
        }
        Ok(targets
            .iter()
            .all(|&target| self.contains(container, target)))
    }

    /// Checks whether `add(container, candidate)` would succeed.
    ///
    /// Returns false for unknown handles, when the weight limit of the
    /// container or of any container above it would be exceeded, and when
    /// the candidate is the container itself or a container that holds it.
    /// A true result guarantees that an immediately following `add` does not
    /// fail.
    #[must_use]
    pub fn fits(&self, container: ItemId, candidate: ItemId) -> bool {
        self.check_insert(container, candidate).is_ok()
    }

    /// Inserts `item` as a direct child of `container`.
    ///
    /// Returns `Ok(false)` without touching anything if the item is already
    /// somewhere inside `container`. An item held by a container in another
    /// tree is moved out of it. On error the inventory is unchanged.
    ///
    /// When the item is the container itself or holds it, the result is
    /// [`InventoryError::CyclicContainment`] even if the weight limit would
    /// also be exceeded; the cycle is checked first.
    pub fn add(&mut self, container: ItemId, item: ItemId) -> InventoryResult<bool> {
        self.contents(container)?;
        self.get(item)?;

        if self.contains(container, item) {
            trace!("{} already inside {}", item, container);
            return Ok(false);
        }

        if let Err(err) = self.check_insert(container, item) {
            debug!("Rejected {} into {}: {}", item, container, err);
            return Err(err);
        }

        if let Some(previous) = self.get(item)?.owner() {
            self.detach(previous, item)?;
        }

        self.contents_mut(container)?.children.push(item);
        self.get_mut(item)?.set_owner(Some(container));
        self.mark_modified(container)?;

        if self.config.log_mutations {
            debug!("Added {} to {}", item, container);
        }
        Ok(true)
    }

    /// Removes `item` from wherever it sits inside `container`.
    ///
    /// The item becomes the root of its own tree and keeps its contents.
    /// Returns `Ok(false)` if the item is not inside `container`. Fails with
    /// [`InventoryError::InvalidArgument`] if `item` is not a live item.
    pub fn remove(&mut self, container: ItemId, item: ItemId) -> InventoryResult<bool> {
        self.contents(container)?;
        self.get(item)?;

        let Some(parent) = self.find_parent(container, item) else {
            return Ok(false);
        };

        self.detach(parent, item)?;

        if self.config.log_mutations {
            debug!("Removed {} from {} (under {})", item, parent, container);
        }
        Ok(true)
    }

    /// Validates an insertion without checking prior membership.
    fn check_insert(&self, container: ItemId, item: ItemId) -> InventoryResult<()> {
        self.contents(container)?;
        let candidate = self.get(item)?;

        // candidate-contains-target only, as `contains` never matches self
        if item == container || (candidate.is_container() && self.contains(item, container)) {
            return Err(InventoryError::CyclicContainment { container, item });
        }

        let added = self.weight(item)?;
        for target in std::iter::once(container).chain(self.ancestors(container)) {
            let max = self.contents(target)?.max_weight;
            let attempted = self.projected_weight(target, container, item, added)?;
            if attempted > max {
                return Err(InventoryError::CapacityExceeded {
                    container: target,
                    attempted,
                    max,
                });
            }
        }

        Ok(())
    }

    /// Weight of `id` as [`Inventory::weight`] would report it once `item`
    /// (weighing `added`) has left its current owner and been appended to
    /// `into`.
    ///
    /// Sums in exactly the order `weight` does after the move, so the f32
    /// result compared against the limit is the one later observed.
    fn projected_weight(
        &self,
        id: ItemId,
        into: ItemId,
        item: ItemId,
        added: f32,
    ) -> InventoryResult<f32> {
        let node = self.get(id)?;
        let mut total = node.weight();
        for &child in node.children() {
            if child != item {
                total += self.projected_weight(child, into, item, added)?;
            }
        }
        if id == into {
            total += added;
        }
        Ok(total)
    }

    /// Finds the direct parent of `item` within the sub-tree of `container`,
    /// searching direct children before descending.
    fn find_parent(&self, container: ItemId, item: ItemId) -> Option<ItemId> {
        let contents = self.contents(container).ok()?;
        if contents.children.contains(&item) {
            return Some(container);
        }
        contents
            .children
            .iter()
            .find_map(|&child| self.find_parent(child, item))
    }

    /// Unlinks `item` from its direct parent and clears the back-reference.
    fn detach(&mut self, parent: ItemId, item: ItemId) -> InventoryResult<()> {
        let children = &mut self.contents_mut(parent)?.children;
        if let Some(index) = children.iter().position(|&c| c == item) {
            children.remove(index);
        }
        self.get_mut(item)?.set_owner(None);
        self.mark_modified(parent)
    }

    /// Bumps the modification counter of `container` and every container
    /// above it.
    fn mark_modified(&mut self, container: ItemId) -> InventoryResult<()> {
        let chain: Vec<ItemId> = std::iter::once(container)
            .chain(self.ancestors(container))
            .collect();
        for id in chain {
            self.contents_mut(id)?.mod_count += 1;
        }
        Ok(())
    }
}

//! Arena-based item storage.

use ahash::{AHashMap, AHashSet};
use pathminder_common::ItemId;
use tracing::{debug, warn};

use crate::config::InventoryConfig;
use crate::error::{InventoryError, InventoryResult};
use crate::item::{Contents, ContainerSpec, Item, ItemSpec};

/// Owner of every item and container in one inventory.
///
/// Items are addressed by [`ItemId`] handles. A handle that was never spawned
/// here, or that has been despawned, is rejected with
/// [`InventoryError::InvalidArgument`].
#[derive(Debug)]
pub struct Inventory {
    /// Storage slots for items
    slots: Vec<Option<Item>>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Map from ItemId to slot index for fast lookup
    id_to_index: AHashMap<ItemId, usize>,
    pub(crate) config: InventoryConfig,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Creates a new empty inventory with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InventoryConfig::default())
    }

    /// Creates a new empty inventory using the given settings.
    #[must_use]
    pub fn with_config(mut config: InventoryConfig) -> Self {
        config.validate();
        Self {
            slots: Vec::with_capacity(config.arena_capacity),
            free_list: Vec::new(),
            id_to_index: AHashMap::with_capacity(config.arena_capacity),
            config,
        }
    }

    /// Returns the settings this inventory was created with.
    #[must_use]
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Returns the number of live items, containers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    /// Returns true if there are no live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    /// Returns true if the handle refers to a live item.
    #[must_use]
    pub fn is_live(&self, id: ItemId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Spawns a plain item with no owner.
    pub fn spawn_item(&mut self, spec: ItemSpec) -> InventoryResult<ItemId> {
        spec.validate()?;
        let item = Item::plain(spec);
        let id = item.id();
        self.insert_slot(item);
        debug!("Spawned item {}", id);
        Ok(id)
    }

    /// Spawns an empty container.
    pub fn spawn_container(&mut self, spec: ContainerSpec) -> InventoryResult<ItemId> {
        self.spawn_container_with(spec, std::iter::empty::<ItemId>())
    }

    /// Spawns a container holding an initial set of children.
    ///
    /// Duplicate handles are collapsed. Every child must be live and must not
    /// be held by any container, and their combined weight must fit within
    /// `spec.capacity`. If any check fails nothing is spawned and no child is
    /// touched.
    pub fn spawn_container_with<I>(
        &mut self,
        spec: ContainerSpec,
        children: I,
    ) -> InventoryResult<ItemId>
    where
        I: IntoIterator<Item = ItemId>,
    {
        spec.validate()?;

        let mut seen = AHashSet::new();
        let mut initial = Vec::with_capacity(self.config.children_capacity);
        for child in children {
            if seen.insert(child) {
                initial.push(child);
            }
        }

        let mut contents_weight = 0.0;
        for &child in &initial {
            if let Some(owner) = self.get(child)?.owner() {
                return Err(InventoryError::AlreadyContained { item: child, owner });
            }
            contents_weight += self.weight(child)?;
        }

        let capacity = spec.capacity;
        let container = Item::container(spec, initial);
        let id = container.id();
        if contents_weight > capacity {
            warn!(
                "Rejected container {}: contents weigh {} over capacity {}",
                id, contents_weight, capacity
            );
            return Err(InventoryError::CapacityExceeded {
                container: id,
                attempted: contents_weight + container.weight(),
                max: container.max_weight().unwrap_or(capacity),
            });
        }

        let children = container.children().to_vec();
        self.insert_slot(container);
        for child in children {
            self.get_mut(child)?.set_owner(Some(id));
        }

        debug!("Spawned container {} with capacity {}", id, capacity);
        Ok(id)
    }

    /// Despawns a root item together with everything inside it.
    ///
    /// Returns the removed items in pre-order, the root first. Fails with
    /// [`InventoryError::AlreadyContained`] if the item is still held by a
    /// container; remove it first.
    pub fn despawn(&mut self, id: ItemId) -> InventoryResult<Vec<Item>> {
        if let Some(owner) = self.get(id)?.owner() {
            return Err(InventoryError::AlreadyContained { item: id, owner });
        }

        let mut order = vec![id];
        order.extend(self.iter_subtree(id));

        let mut removed = Vec::with_capacity(order.len());
        for item_id in order {
            if let Some(index) = self.id_to_index.remove(&item_id) {
                if let Some(item) = self.slots[index].take() {
                    removed.push(item);
                }
                self.free_list.push(index);
            }
        }

        debug!("Despawned {} ({} items)", id, removed.len());
        Ok(removed)
    }

    /// Gets a reference to an item by ID.
    pub fn get(&self, id: ItemId) -> InventoryResult<&Item> {
        let index = self
            .id_to_index
            .get(&id)
            .ok_or(InventoryError::InvalidArgument(id))?;

        self.slots[*index]
            .as_ref()
            .ok_or(InventoryError::InvalidArgument(id))
    }

    /// Gets a mutable reference to an item by ID.
    pub(crate) fn get_mut(&mut self, id: ItemId) -> InventoryResult<&mut Item> {
        let index = self
            .id_to_index
            .get(&id)
            .ok_or(InventoryError::InvalidArgument(id))?;

        self.slots[*index]
            .as_mut()
            .ok_or(InventoryError::InvalidArgument(id))
    }

    /// Returns the container state of `id`, failing for plain items.
    pub(crate) fn contents(&self, id: ItemId) -> InventoryResult<&Contents> {
        self.get(id)?
            .contents
            .as_ref()
            .ok_or(InventoryError::NotAContainer(id))
    }

    pub(crate) fn contents_mut(&mut self, id: ItemId) -> InventoryResult<&mut Contents> {
        self.get_mut(id)?
            .contents
            .as_mut()
            .ok_or(InventoryError::NotAContainer(id))
    }

    /// Returns the container currently holding `id`.
    pub fn owner(&self, id: ItemId) -> InventoryResult<Option<ItemId>> {
        Ok(self.get(id)?.owner())
    }

    /// Returns the chain of containers above `id`, nearest first.
    pub fn ancestors(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        std::iter::successors(self.owner_of(id), move |&c| self.owner_of(c))
    }

    fn owner_of(&self, id: ItemId) -> Option<ItemId> {
        self.get(id).ok().and_then(Item::owner)
    }

    /// Iterates over all live items in slot order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Iterates over the live items that are not held by any container.
    pub fn roots(&self) -> impl Iterator<Item = &Item> {
        self.items().filter(|item| item.owner().is_none())
    }

    fn insert_slot(&mut self, item: Item) {
        let id = item.id();

        let index = if let Some(free_index) = self.free_list.pop() {
            // Reuse a free slot
            self.slots[free_index] = Some(item);
            free_index
        } else {
            let index = self.slots.len();
            self.slots.push(Some(item));
            index
        };

        self.id_to_index.insert(id, index);
    }
}

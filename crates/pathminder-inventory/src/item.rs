//! Items, containers and their construction specs.

use pathminder_common::ItemId;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

/// Description of a plain item to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Display name
    pub name: String,
    /// Unit weight (non-negative)
    pub weight: f32,
    /// Cost
    pub cost: f32,
}

impl ItemSpec {
    /// Creates a new item spec.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f32, cost: f32) -> Self {
        Self {
            name: name.into(),
            weight,
            cost,
        }
    }

    pub(crate) fn validate(&self) -> InventoryResult<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(InventoryError::InvalidSpec {
                field: "weight",
                value: self.weight,
            });
        }
        if !self.cost.is_finite() {
            return Err(InventoryError::InvalidSpec {
                field: "cost",
                value: self.cost,
            });
        }
        Ok(())
    }
}

/// Description of a container to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// The container's own item attributes
    #[serde(flatten)]
    pub item: ItemSpec,
    /// Maximum weight of the contents, excluding the container itself
    pub capacity: f32,
}

impl ContainerSpec {
    /// Creates a new container spec.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f32, capacity: f32, cost: f32) -> Self {
        Self {
            item: ItemSpec::new(name, weight, cost),
            capacity,
        }
    }

    pub(crate) fn validate(&self) -> InventoryResult<()> {
        self.item.validate()?;
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(InventoryError::InvalidSpec {
                field: "capacity",
                value: self.capacity,
            });
        }
        Ok(())
    }
}

/// Container-only state of an [`Item`].
#[derive(Debug, Clone)]
pub(crate) struct Contents {
    /// Direct children in insertion order, each present once
    pub(crate) children: Vec<ItemId>,
    /// Content capacity as given at construction
    pub(crate) capacity: f32,
    /// Bound on total weight: capacity plus own weight
    pub(crate) max_weight: f32,
    /// Bumped on every structural change in this sub-tree
    pub(crate) mod_count: u64,
}

/// An item stored in an [`Inventory`](crate::Inventory).
///
/// Containers are items too; they carry a list of direct children and a
/// weight limit. The owner back-reference can only be changed by the
/// inventory's add/remove path.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    name: String,
    weight: f32,
    cost: f32,
    owner: Option<ItemId>,
    pub(crate) contents: Option<Contents>,
}

impl Item {
    pub(crate) fn plain(spec: ItemSpec) -> Self {
        Self {
            id: ItemId::new(),
            name: spec.name,
            weight: spec.weight,
            cost: spec.cost,
            owner: None,
            contents: None,
        }
    }

    pub(crate) fn container(spec: ContainerSpec, children: Vec<ItemId>) -> Self {
        let max_weight = spec.capacity + spec.item.weight;
        let mut item = Self::plain(spec.item);
        item.contents = Some(Contents {
            children,
            capacity: spec.capacity,
            max_weight,
            mod_count: 0,
        });
        item
    }

    /// Returns the item's unique ID.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the item's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item's own weight, not counting any contents.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the item's cost.
    #[must_use]
    pub const fn cost(&self) -> f32 {
        self.cost
    }

    /// Returns the container currently holding this item, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<ItemId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<ItemId>) {
        self.owner = owner;
    }

    /// Returns true if this item can hold other items.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.contents.is_some()
    }

    /// Returns the content capacity, or `None` for plain items.
    #[must_use]
    pub fn capacity(&self) -> Option<f32> {
        self.contents.as_ref().map(|c| c.capacity)
    }

    /// Returns the bound on total weight (capacity plus own weight), or
    /// `None` for plain items.
    #[must_use]
    pub fn max_weight(&self) -> Option<f32> {
        self.contents.as_ref().map(|c| c.max_weight)
    }

    /// Returns the direct children in insertion order. Empty for plain items.
    #[must_use]
    pub fn children(&self) -> &[ItemId] {
        self.contents
            .as_ref()
            .map(|c| c.children.as_slice())
            .unwrap_or_default()
    }
}

/// Sums the own weight of a collection of items.
///
/// Contents are not looked up; use
/// [`Inventory::total_weight`](crate::Inventory::total_weight) for totals
/// that include everything inside containers.
pub fn total_own_weight<'a, I>(items: I) -> f32
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().map(Item::weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_item() {
        let item = Item::plain(ItemSpec::new("Ball", 1.0, 2.5));
        assert_eq!(item.name(), "Ball");
        assert_eq!(item.weight(), 1.0);
        assert_eq!(item.cost(), 2.5);
        assert!(item.owner().is_none());
        assert!(!item.is_container());
        assert!(item.children().is_empty());
        assert!(item.capacity().is_none());
    }

    #[test]
    fn test_container_max_weight_includes_own_weight() {
        let spec = ContainerSpec::new("Box", 1.0, 10.0, 1.0);
        let item = Item::container(spec, Vec::new());
        assert!(item.is_container());
        assert_eq!(item.capacity(), Some(10.0));
        assert_eq!(item.max_weight(), Some(11.0));
    }

    #[test]
    fn test_spec_validation() {
        assert!(ItemSpec::new("ok", 0.0, -3.0).validate().is_ok());
        assert!(matches!(
            ItemSpec::new("heavy", -1.0, 0.0).validate(),
            Err(InventoryError::InvalidSpec {
                field: "weight",
                ..
            })
        ));
        assert!(matches!(
            ItemSpec::new("priceless", 1.0, f32::NAN).validate(),
            Err(InventoryError::InvalidSpec { field: "cost", .. })
        ));
        assert!(matches!(
            ContainerSpec::new("sack", 1.0, f32::INFINITY, 0.0).validate(),
            Err(InventoryError::InvalidSpec {
                field: "capacity",
                ..
            })
        ));
    }

    #[test]
    fn test_total_own_weight_ignores_contents() {
        let items = [
            Item::plain(ItemSpec::new("a", 1.0, 0.0)),
            Item::plain(ItemSpec::new("b", 2.5, 0.0)),
            Item::container(ContainerSpec::new("c", 0.5, 10.0, 0.0), vec![ItemId::new()]),
        ];
        assert_eq!(total_own_weight(&items), 4.0);
        assert_eq!(total_own_weight(std::iter::empty()), 0.0);
    }
}

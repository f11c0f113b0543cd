//! Item Entity
//!
//! A sellable menu item. Ownership by category is by foreign key.

use serde::{Deserialize, Serialize};

use super::entity::{CategoryId, Entity, ItemId, Ordered};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    /// Dense, zero-based position within the owning category
    pub order: u32,
    pub category_id: CategoryId,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: i64,
        order: u32,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            order,
            category_id: category_id.into(),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Ordered for Item {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

//! Category Entity
//!
//! A named group of items within one menu.

use serde::{Deserialize, Serialize};

use super::entity::{CategoryId, Entity, Ordered};
use super::item::Item;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Dense, zero-based position among the menu's categories
    pub order: u32,
    /// Embedded items (owned by foreign key, see `Item::category_id`)
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &super::ItemId> {
        self.items.iter().map(|i| &i.id)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Ordered for Category {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

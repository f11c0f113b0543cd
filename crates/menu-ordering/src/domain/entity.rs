//! Domain Layer - Core Entity Traits
//!
//! Every orderable entity has a unique id and a dense, zero-based `order`
//! among its siblings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + Ord + std::hash::Hash + fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// An entity positioned within a sibling collection
pub trait Ordered: Entity {
    fn order(&self) -> u32;

    fn set_order(&mut self, order: u32);
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a menu (the root of one category tree)
    MenuId
);
string_id!(
    /// Identifier of a category, unique within its menu
    CategoryId
);
string_id!(
    /// Identifier of an item, unique within its menu
    ItemId
);

/// `{id, order}` pair: the unit of every draft overlay and save payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry<Id> {
    pub id: Id,
    pub order: u32,
}

impl<Id> OrderEntry<Id> {
    pub fn new(id: Id, order: u32) -> Self {
        Self { id, order }
    }
}

impl<Id> Entity for OrderEntry<Id>
where
    Id: Clone + Eq + Ord + std::hash::Hash + fmt::Debug,
{
    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl<Id> Ordered for OrderEntry<Id>
where
    Id: Clone + Eq + Ord + std::hash::Hash + fmt::Debug,
{
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CategoryId::from("cat-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cat-1\"");
        assert_eq!(id.to_string(), "cat-1");
    }

    #[test]
    fn test_order_entry_is_ordered() {
        let mut entry = OrderEntry::new(ItemId::from("i1"), 3);
        assert_eq!(entry.id().as_str(), "i1");
        entry.set_order(0);
        assert_eq!(entry.order(), 0);
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"id":"i1","order":0}"#
        );
    }
}

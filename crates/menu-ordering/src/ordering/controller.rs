//! Reorder Controllers
//!
//! Turn a completed drop (`from_id` dropped onto `to_id`) into a full new
//! permutation of one sibling collection. Controllers never touch the tree;
//! they only propose a [`ReorderProposed`] event for the engine to apply.
//!
//! The scope is part of the controller's type, so a category controller can
//! only ever emit category orderings and an item controller only the
//! orderings of its own category.

use crate::domain::{Category, CategoryId, Entity, Item, ItemId, OrderEntry, Ordered};

use super::collection::OrderedCollection;

/// Event emitted by a controller after a valid drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderProposed {
    Categories(Vec<OrderEntry<CategoryId>>),
    Items {
        category_id: CategoryId,
        entries: Vec<OrderEntry<ItemId>>,
    },
}

/// Which sibling collection a controller reorders
pub trait ReorderScope {
    type Entity: Ordered;

    fn propose(&self, entries: Vec<OrderEntry<<Self::Entity as Entity>::Id>>) -> ReorderProposed;

    fn describe(&self) -> String;
}

/// The menu's category list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScope;

impl ReorderScope for CategoryScope {
    type Entity = Category;

    fn propose(&self, entries: Vec<OrderEntry<CategoryId>>) -> ReorderProposed {
        ReorderProposed::Categories(entries)
    }

    fn describe(&self) -> String {
        "categories".to_string()
    }
}

/// The item list of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemScope(pub CategoryId);

impl ReorderScope for ItemScope {
    type Entity = Item;

    fn propose(&self, entries: Vec<OrderEntry<ItemId>>) -> ReorderProposed {
        ReorderProposed::Items {
            category_id: self.0.clone(),
            entries,
        }
    }

    fn describe(&self) -> String {
        format!("items of {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderController<S> {
    scope: S,
}

pub type CategoryReorderController = ReorderController<CategoryScope>;
pub type ItemReorderController = ReorderController<ItemScope>;

impl CategoryReorderController {
    pub fn for_categories() -> Self {
        Self { scope: CategoryScope }
    }
}

impl ItemReorderController {
    pub fn for_items(category_id: CategoryId) -> Self {
        Self {
            scope: ItemScope(category_id),
        }
    }
}

impl<S: ReorderScope> ReorderController<S> {
    /// Compute the permutation produced by dropping `from_id` onto `to_id`
    /// within `current` (the list as currently displayed).
    ///
    /// Returns `None` for cancelled drops (`to_id` is `None`), drops onto
    /// self, and ids that are not part of `current`.
    pub fn on_drop(
        &self,
        current: &[S::Entity],
        from_id: &<S::Entity as Entity>::Id,
        to_id: Option<&<S::Entity as Entity>::Id>,
    ) -> Option<ReorderProposed> {
        let to_id = to_id?;
        if from_id == to_id {
            return None;
        }

        let collection = OrderedCollection::from_positions(current.to_vec());
        let (Some(from), Some(to)) = (collection.position_of(from_id), collection.position_of(to_id))
        else {
            log::debug!(
                "Ignoring drop on {}: {:?} -> {:?} not in list",
                self.scope.describe(),
                from_id,
                to_id
            );
            return None;
        };

        let moved = collection.moved(from, to).ok()?;
        log::debug!("Reorder proposed for {}: {} -> {}", self.scope.describe(), from, to);
        Some(self.scope.propose(moved.entries()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(ids: &[&str]) -> Vec<Category> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Category::new(*id, id.to_uppercase(), i as u32))
            .collect()
    }

    #[test]
    fn test_drag_last_category_before_first() {
        let controller = CategoryReorderController::for_categories();
        let list = categories(&["a", "b", "c"]);

        let event = controller
            .on_drop(&list, &CategoryId::from("c"), Some(&CategoryId::from("a")))
            .unwrap();

        assert_eq!(
            event,
            ReorderProposed::Categories(vec![
                OrderEntry::new(CategoryId::from("c"), 0),
                OrderEntry::new(CategoryId::from("a"), 1),
                OrderEntry::new(CategoryId::from("b"), 2),
            ])
        );
    }

    #[test]
    fn test_cancelled_and_self_drops_are_noops() {
        let controller = CategoryReorderController::for_categories();
        let list = categories(&["a", "b"]);
        let a = CategoryId::from("a");

        assert_eq!(controller.on_drop(&list, &a, None), None);
        assert_eq!(controller.on_drop(&list, &a, Some(&a)), None);
        assert_eq!(
            controller.on_drop(&list, &a, Some(&CategoryId::from("missing"))),
            None
        );
    }

    #[test]
    fn test_item_controller_tags_its_category() {
        let controller = ItemReorderController::for_items(CategoryId::from("x"));
        let items = vec![
            Item::new("1", "One", 100, 0, "x"),
            Item::new("2", "Two", 200, 1, "x"),
        ];

        let event = controller
            .on_drop(&items, &ItemId::from("1"), Some(&ItemId::from("2")))
            .unwrap();

        match event {
            ReorderProposed::Items { category_id, entries } => {
                assert_eq!(category_id, CategoryId::from("x"));
                assert_eq!(
                    entries,
                    vec![
                        OrderEntry::new(ItemId::from("2"), 0),
                        OrderEntry::new(ItemId::from("1"), 1),
                    ]
                );
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

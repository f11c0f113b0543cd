//! Nested Payload Builder
//!
//! Merges the category draft and the per-category item drafts over the
//! last-known-good tree into the single nested save payload.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryId, ItemId, OrderEntry};

use super::collection::OrderedCollection;
use super::dirty::DirtyTracker;

/// One category of the nested save payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOrderPayload {
    pub id: CategoryId,
    pub order: u32,
    pub items: Vec<OrderEntry<ItemId>>,
}

/// Build the payload for every category and every item of `snapshot`.
///
/// - category order: the draft's order when the draft is non-empty and
///   names the category, otherwise the category's index in `snapshot`
/// - items: the category's item draft if present, otherwise its own items
///   sorted by `order` and renumbered densely
pub fn build_nested_payload(
    snapshot: &[Category],
    category_draft: &[OrderEntry<CategoryId>],
    item_drafts: &BTreeMap<CategoryId, Vec<OrderEntry<ItemId>>>,
) -> Vec<CategoryOrderPayload> {
    let drafted: HashMap<&CategoryId, u32> = category_draft
        .iter()
        .map(|entry| (&entry.id, entry.order))
        .collect();

    snapshot
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let order = drafted.get(&category.id).copied().unwrap_or(idx as u32);

            let items = match item_drafts.get(&category.id) {
                Some(draft) => draft.clone(),
                None => OrderedCollection::from_unordered(category.items.clone())
                    .iter()
                    .map(|item| OrderEntry::new(item.id.clone(), item.order))
                    .collect(),
            };

            CategoryOrderPayload {
                id: category.id.clone(),
                order,
                items,
            }
        })
        .collect()
}

/// Convenience over [`build_nested_payload`] reading the drafts from a tracker
pub fn build_from_tracker(snapshot: &[Category], tracker: &DirtyTracker) -> Vec<CategoryOrderPayload> {
    build_nested_payload(snapshot, tracker.category_draft(), tracker.item_drafts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;

    fn menu() -> Vec<Category> {
        vec![
            Category::new("x", "X", 0).with_items(vec![
                Item::new("1", "One", 100, 0, "x"),
                Item::new("2", "Two", 100, 1, "x"),
                Item::new("3", "Three", 100, 2, "x"),
            ]),
            Category::new("y", "Y", 1).with_items(vec![
                Item::new("4", "Four", 100, 0, "y"),
                Item::new("5", "Five", 100, 1, "y"),
            ]),
        ]
    }

    fn item_ids(payload: &CategoryOrderPayload) -> Vec<&str> {
        payload.items.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_clean_tree_falls_back_to_snapshot() {
        let payload = build_nested_payload(&menu(), &[], &BTreeMap::new());

        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].order, 0);
        assert_eq!(payload[1].order, 1);
        assert_eq!(item_ids(&payload[0]), vec!["1", "2", "3"]);
        assert_eq!(item_ids(&payload[1]), vec!["4", "5"]);
    }

    #[test]
    fn test_untouched_category_is_still_sent() {
        let mut drafts = BTreeMap::new();
        drafts.insert(
            CategoryId::from("x"),
            vec![
                OrderEntry::new(ItemId::from("3"), 0),
                OrderEntry::new(ItemId::from("1"), 1),
                OrderEntry::new(ItemId::from("2"), 2),
            ],
        );

        let payload = build_nested_payload(&menu(), &[], &drafts);

        assert_eq!(item_ids(&payload[0]), vec!["3", "1", "2"]);
        assert_eq!(payload[1].id, CategoryId::from("y"));
        assert_eq!(item_ids(&payload[1]), vec!["4", "5"]);
        assert_eq!(payload[1].items[1].order, 1);
    }

    #[test]
    fn test_stale_orders_are_normalized() {
        let mut tree = menu();
        tree[1].order = 9;
        tree[1].items[0].order = 5;
        tree[1].items[1].order = 2;

        let payload = build_nested_payload(&tree, &[], &BTreeMap::new());

        assert_eq!(payload[1].order, 1);
        assert_eq!(item_ids(&payload[1]), vec!["5", "4"]);
        assert_eq!(
            payload[1].items.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_category_draft_wins() {
        let draft = vec![
            OrderEntry::new(CategoryId::from("y"), 0),
            OrderEntry::new(CategoryId::from("x"), 1),
        ];
        let payload = build_nested_payload(&menu(), &draft, &BTreeMap::new());

        assert_eq!(payload[0].id, CategoryId::from("x"));
        assert_eq!(payload[0].order, 1);
        assert_eq!(payload[1].order, 0);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_category_order(vec![
            OrderEntry::new(CategoryId::from("y"), 0),
            OrderEntry::new(CategoryId::from("x"), 1),
        ]);

        let first = serde_json::to_vec(&build_from_tracker(&menu(), &tracker)).unwrap();
        let second = serde_json::to_vec(&build_from_tracker(&menu(), &tracker)).unwrap();
        assert_eq!(first, second);
    }
}

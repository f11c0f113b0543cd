//! In-process menu backend.
//!
//! Applies orderings atomically the way the real service does, and supports
//! failure injection so callers can exercise their retry paths.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use super::{ApiError, ApiResult, MenuApi};
use crate::domain::{Category, CategoryId, ItemId, MenuId, MenuSummary};
use crate::ordering::{CategoryOrderPayload, OrderedCollection};

#[derive(Debug, Clone)]
struct StoredMenu {
    name: String,
    categories: Vec<Category>,
}

#[derive(Debug, Default)]
pub struct InMemoryMenuApi {
    menus: RefCell<BTreeMap<MenuId, StoredMenu>>,
    failing_saves: Cell<u32>,
    failing_fetches: Cell<u32>,
    save_calls: Cell<u32>,
    fetch_calls: Cell<u32>,
}

impl InMemoryMenuApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu(self, id: impl Into<MenuId>, name: impl Into<String>, categories: Vec<Category>) -> Self {
        self.insert_menu(id.into(), name.into(), categories);
        self
    }

    pub fn insert_menu(&self, id: MenuId, name: String, categories: Vec<Category>) {
        self.menus
            .borrow_mut()
            .insert(id, StoredMenu { name, categories });
    }

    /// The next `count` saves fail with a server error.
    pub fn fail_next_saves(&self, count: u32) {
        self.failing_saves.set(count);
    }

    /// The next `count` tree fetches fail with a network error.
    pub fn fail_next_fetches(&self, count: u32) {
        self.failing_fetches.set(count);
    }

    pub fn save_calls(&self) -> u32 {
        self.save_calls.get()
    }

    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.get()
    }

    /// Server-side view of a menu, sorted the way the service returns it
    pub fn stored_tree(&self, menu_id: &MenuId) -> Option<Vec<Category>> {
        self.menus.borrow().get(menu_id).map(|m| sorted(&m.categories))
    }

    fn take_failure(counter: &Cell<u32>) -> bool {
        let remaining = counter.get();
        if remaining > 0 {
            counter.set(remaining - 1);
            true
        } else {
            false
        }
    }
}

fn sorted(categories: &[Category]) -> Vec<Category> {
    OrderedCollection::from_unordered(categories.to_vec())
        .into_iter()
        .map(|mut category| {
            category.items = OrderedCollection::from_unordered(category.items).into_vec();
            category
        })
        .collect()
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError::http(404, &format!("{what} {id} not found"), "Request failed")
}

/// Every category and item of the menu exactly once; otherwise nothing is applied.
fn check_complete(categories: &[Category], payload: &[CategoryOrderPayload]) -> Result<(), String> {
    let expected: BTreeSet<&CategoryId> = categories.iter().map(|c| &c.id).collect();
    let sent: BTreeSet<&CategoryId> = payload.iter().map(|c| &c.id).collect();
    if expected != sent || sent.len() != payload.len() {
        return Err("category set mismatch".to_string());
    }

    for category in categories {
        let Some(entry) = payload.iter().find(|p| p.id == category.id) else {
            return Err(format!("category {} missing", category.id));
        };
        let expected: BTreeSet<&ItemId> = category.items.iter().map(|i| &i.id).collect();
        let sent: BTreeSet<&ItemId> = entry.items.iter().map(|i| &i.id).collect();
        if expected != sent || sent.len() != entry.items.len() {
            return Err(format!("item set mismatch in category {}", category.id));
        }
    }
    Ok(())
}

#[async_trait(?Send)]
impl MenuApi for InMemoryMenuApi {
    async fn list_menus(&self) -> ApiResult<Vec<MenuSummary>> {
        Ok(self
            .menus
            .borrow()
            .iter()
            .map(|(id, menu)| MenuSummary {
                id: id.clone(),
                name: menu.name.clone(),
            })
            .collect())
    }

    async fn fetch_category_tree(&self, menu_id: &MenuId) -> ApiResult<Vec<Category>> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if Self::take_failure(&self.failing_fetches) {
            return Err(ApiError::network("connection reset"));
        }
        self.stored_tree(menu_id)
            .ok_or_else(|| not_found("menu", menu_id.as_str()))
    }

    async fn save_ordering(
        &self,
        menu_id: &MenuId,
        categories: &[CategoryOrderPayload],
    ) -> ApiResult<()> {
        self.save_calls.set(self.save_calls.get() + 1);
        if Self::take_failure(&self.failing_saves) {
            return Err(ApiError::http(500, "internal error", "Save ordering failed"));
        }

        let mut menus = self.menus.borrow_mut();
        let menu = menus
            .get_mut(menu_id)
            .ok_or_else(|| not_found("menu", menu_id.as_str()))?;

        check_complete(&menu.categories, categories)
            .map_err(|reason| ApiError::http(422, &reason, "Save ordering failed"))?;

        for category in menu.categories.iter_mut() {
            let Some(entry) = categories.iter().find(|p| p.id == category.id) else {
                continue;
            };
            category.order = entry.order;
            for item in category.items.iter_mut() {
                if let Some(item_entry) = entry.items.iter().find(|e| e.id == item.id) {
                    item.order = item_entry.order;
                }
            }
        }
        Ok(())
    }

    async fn delete_category(&self, menu_id: &MenuId, category_id: &CategoryId) -> ApiResult<()> {
        let mut menus = self.menus.borrow_mut();
        let menu = menus
            .get_mut(menu_id)
            .ok_or_else(|| not_found("menu", menu_id.as_str()))?;

        let before = menu.categories.len();
        menu.categories.retain(|c| &c.id != category_id);
        if menu.categories.len() == before {
            return Err(not_found("category", category_id.as_str()));
        }
        menu.categories = OrderedCollection::from_unordered(std::mem::take(&mut menu.categories))
            .into_vec();
        Ok(())
    }

    async fn delete_item(&self, menu_id: &MenuId, item_id: &ItemId) -> ApiResult<()> {
        let mut menus = self.menus.borrow_mut();
        let menu = menus
            .get_mut(menu_id)
            .ok_or_else(|| not_found("menu", menu_id.as_str()))?;

        for category in menu.categories.iter_mut() {
            if category.items.iter().any(|i| &i.id == item_id) {
                category.items.retain(|i| &i.id != item_id);
                category.items =
                    OrderedCollection::from_unordered(std::mem::take(&mut category.items))
                        .into_vec();
                return Ok(());
            }
        }
        Err(not_found("item", item_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, OrderEntry};
    use crate::ordering::build_nested_payload;

    fn api() -> InMemoryMenuApi {
        InMemoryMenuApi::new().with_menu(
            "m",
            "Lunch",
            vec![
                Category::new("b", "B", 1).with_items(vec![Item::new("3", "Three", 300, 0, "b")]),
                Category::new("a", "A", 0).with_items(vec![
                    Item::new("2", "Two", 200, 1, "a"),
                    Item::new("1", "One", 100, 0, "a"),
                ]),
            ],
        )
    }

    #[tokio::test]
    async fn test_fetch_returns_sorted_tree() {
        let api = api();
        let tree = api.fetch_category_tree(&MenuId::from("m")).await.unwrap();

        assert_eq!(tree[0].id, CategoryId::from("a"));
        assert_eq!(tree[0].items[0].id, ItemId::from("1"));
        assert_eq!(api.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_payload_is_rejected_atomically() {
        let api = api();
        let menu_id = MenuId::from("m");
        let partial = vec![CategoryOrderPayload {
            id: CategoryId::from("b"),
            order: 0,
            items: vec![OrderEntry::new(ItemId::from("3"), 0)],
        }];

        let err = api.save_ordering(&menu_id, &partial).await.unwrap_err();
        assert!(err.message.contains("422"));

        let tree = api.stored_tree(&menu_id).unwrap();
        assert_eq!(tree[0].id, CategoryId::from("a"));
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let api = api();
        let menu_id = MenuId::from("m");
        let tree = api.stored_tree(&menu_id).unwrap();
        let payload = build_nested_payload(&tree, &[], &BTreeMap::new());

        api.fail_next_saves(1);
        assert!(api.save_ordering(&menu_id, &payload).await.is_err());
        assert!(api.save_ordering(&menu_id, &payload).await.is_ok());
        assert_eq!(api.save_calls(), 2);
    }

    #[tokio::test]
    async fn test_delete_renumbers_siblings() {
        let api = api();
        let menu_id = MenuId::from("m");

        api.delete_category(&menu_id, &CategoryId::from("a")).await.unwrap();
        api.delete_item(&menu_id, &ItemId::from("3")).await.unwrap();

        let tree = api.stored_tree(&menu_id).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].order, 0);
        assert!(tree[0].items.is_empty());
        assert!(api
            .delete_item(&menu_id, &ItemId::from("3"))
            .await
            .is_err());
    }
}

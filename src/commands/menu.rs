//! Menu Commands
//!
//! Async calls to the menu service. Errors are flattened to display strings;
//! save results are handed back unchanged so the engine can reconcile them.

use menu_ordering::{
    ApiError, Category, CategoryId, InMemoryMenuApi, Item, ItemId, MenuApi, MenuId, MenuSummary,
    SaveOutcome, SaveTicket,
};

use super::gateway;

// ========================
// Commands
// ========================

pub async fn list_menus() -> Result<Vec<MenuSummary>, String> {
    let gateway = gateway()?;
    gateway.api().list_menus().await.map_err(|e| e.to_string())
}

pub async fn fetch_tree(menu_id: &MenuId) -> Result<Vec<Category>, String> {
    let gateway = gateway()?;
    gateway.fetch(menu_id).await.map_err(|e| e.to_string())
}

/// Network half of a save; the ticket comes from `MenuOrderingEngine::begin_save`
pub async fn submit_save(ticket: &SaveTicket) -> SaveOutcome {
    match gateway() {
        Ok(gateway) => gateway.submit(ticket).await,
        Err(e) => SaveOutcome::Failed(ApiError::network(e)),
    }
}

/// Delete a category and return the refetched tree
pub async fn delete_category(
    menu_id: &MenuId,
    category_id: &CategoryId,
) -> Result<Vec<Category>, String> {
    let gateway = gateway()?;
    gateway
        .delete_category(menu_id, category_id)
        .await
        .map_err(|e| e.to_string())
}

/// Delete an item and return the refetched tree
pub async fn delete_item(menu_id: &MenuId, item_id: &ItemId) -> Result<Vec<Category>, String> {
    let gateway = gateway()?;
    gateway
        .delete_item(menu_id, item_id)
        .await
        .map_err(|e| e.to_string())
}

// ========================
// Demo backend
// ========================

/// In-process backend with two sample menus, used when `window.ENV.DEMO` is set
pub(super) fn demo_api() -> InMemoryMenuApi {
    let item = |id: &str, name: &str, price: i64, order: u32, category: &str| {
        Item::new(id, name, price, order, category)
    };

    InMemoryMenuApi::new()
        .with_menu(
            "lunch",
            "Lunch",
            vec![
                Category::new("starters", "Starters", 0).with_items(vec![
                    item("soup", "Soup of the day", 650, 0, "starters"),
                    item("bruschetta", "Bruschetta", 750, 1, "starters"),
                    item("olives", "Marinated olives", 450, 2, "starters"),
                ]),
                Category::new("mains", "Mains", 1).with_items(vec![
                    item("risotto", "Mushroom risotto", 1650, 0, "mains"),
                    item("burger", "House burger", 1450, 1, "mains"),
                    item("salmon", "Grilled salmon", 1950, 2, "mains"),
                ]),
                Category::new("desserts", "Desserts", 2).with_items(vec![
                    item("tiramisu", "Tiramisu", 750, 0, "desserts"),
                    item("sorbet", "Lemon sorbet", 550, 1, "desserts"),
                ]),
            ],
        )
        .with_menu(
            "drinks",
            "Drinks",
            vec![
                Category::new("soft", "Soft drinks", 0).with_items(vec![
                    item("cola", "Cola", 350, 0, "soft"),
                    item("lemonade", "Lemonade", 400, 1, "soft"),
                ]),
                Category::new("hot", "Hot drinks", 1).with_items(vec![
                    item("espresso", "Espresso", 280, 0, "hot"),
                    item("tea", "Tea", 300, 1, "hot"),
                ]),
            ],
        )
}

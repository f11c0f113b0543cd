//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{MenuId, MenuSummary};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All menus the operator can edit
    pub menus: Vec<MenuSummary>,
    /// Menu shown in the manager
    pub current_menu_id: Option<MenuId>,
    /// Menu list request in progress
    pub loading_menus: bool,
    /// Last menu list failure
    pub menus_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the menu list, keeping the selection when it still exists
pub fn store_set_menus(store: &AppStore, menus: Vec<MenuSummary>) {
    let current = store.current_menu_id().get_untracked();
    let keep = current
        .as_ref()
        .is_some_and(|id| menus.iter().any(|m| &m.id == id));
    if !keep {
        store
            .current_menu_id()
            .set(menus.first().map(|m| m.id.clone()));
    }
    store.menus().set(menus);
    store.menus_error().set(None);
}

pub fn store_select_menu(store: &AppStore, menu_id: MenuId) {
    store.current_menu_id().set(Some(menu_id));
}

//! Menu Admin App
//!
//! Menu picker on top, the manager for the selected menu below.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{MenuManager, MenuPicker, ToastHost};
use crate::context::AppContext;
use crate::store::{store_set_menus, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (toast, set_toast) = signal(None);
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (toast, set_toast));
    provide_context(ctx);

    // Load menus on mount and on every reload
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("Loading menus, trigger={}", trigger);
        store.loading_menus().set(true);
        spawn_local(async move {
            match commands::list_menus().await {
                Ok(menus) => {
                    log::info!("Loaded {} menus", menus.len());
                    store_set_menus(&store, menus);
                }
                Err(e) => {
                    let _ = rolling_logger::error(&format!("Loading menus failed: {}", e));
                    store.menus_error().set(Some(e));
                }
            }
            store.loading_menus().set(false);
        });
    });

    let current_menu = Memo::new(move |_| store.current_menu_id().get());

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Menu Admin"</h1>
                <MenuPicker />
            </header>

            <main class="main-content">
                {move || match current_menu.get() {
                    Some(menu_id) => view! { <MenuManager menu_id=menu_id /> }.into_any(),
                    None => view! {
                        <p class="empty-hint">"Pick a menu to arrange its categories and items."</p>
                    }.into_any(),
                }}
            </main>

            <ToastHost />
        </div>
    }
}

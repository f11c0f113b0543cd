//! Menu Picker Component
//!
//! Tab bar for switching between menus.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{store_select_menu, use_app_store, AppStateStoreFields};

#[component]
pub fn MenuPicker() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <div class="menu-tab-bar">
            <For
                each=move || store.menus().get()
                key=|menu| menu.id.clone()
                children=move |menu| {
                    let id = menu.id.clone();
                    let is_active = {
                        let id = id.clone();
                        move || store.current_menu_id().with(|current| current.as_ref() == Some(&id))
                    };
                    let tab_class = move || {
                        if is_active() { "menu-tab active" } else { "menu-tab" }
                    };

                    view! {
                        <button
                            class=tab_class
                            on:click=move |_| store_select_menu(&store, id.clone())
                        >
                            {menu.name.clone()}
                        </button>
                    }
                }
            />

            <Show when=move || store.loading_menus().get()>
                <span class="menu-tab-status">"Loading menus…"</span>
            </Show>

            {move || store.menus_error().get().map(|error| view! {
                <span class="menu-tab-status error">
                    {error}
                    <button class="retry-btn" on:click=move |_| ctx.reload()>"Retry"</button>
                </span>
            })}
        </div>
    }
}

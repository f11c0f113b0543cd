//! Menu Manager Component
//!
//! Owns the ordering engine for one menu: loading, the Save Order action,
//! expand/collapse controls and the category list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use menu_ordering::{LoadState, MenuOrderingEngine};

use crate::commands;
use crate::components::CategoryList;
use crate::context::AppContext;
use crate::models::MenuId;

#[component]
pub fn MenuManager(menu_id: MenuId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let engine = RwSignal::new(MenuOrderingEngine::new(menu_id));

    let load = move || {
        let menu_id = engine.with_untracked(|e| e.menu_id().clone());
        engine.update(|e| e.begin_load());
        spawn_local(async move {
            let result = commands::fetch_tree(&menu_id).await;
            engine.try_update(|e| match result {
                Ok(tree) => e.replace_tree(tree),
                Err(message) => e.load_failed(message),
            });
        });
    };
    load();

    let on_save = move |_: web_sys::MouseEvent| {
        let ticket = match engine.try_update(|e| e.begin_save()) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                ctx.notify_error(e.user_message());
                return;
            }
            None => return,
        };
        spawn_local(async move {
            let outcome = commands::submit_save(&ticket).await;
            match engine.try_update(|e| e.complete_save(outcome)) {
                Some(Ok(())) => ctx.notify_success("Order saved"),
                Some(Err(e)) => ctx.notify_error(e.user_message()),
                None => log::warn!("Menu {} closed before its save finished", ticket.menu_id),
            }
        });
    };

    // Memo so the list is rebuilt only when the load state really changes
    let load_state = Memo::new(move |_| engine.with(|e| e.load_state().clone()));
    let can_save = move || engine.with(|e| e.can_save());
    let is_saving = move || engine.with(|e| e.is_saving());
    let is_dirty = move || engine.with(|e| e.is_dirty());
    let is_ready = move || load_state.get() == LoadState::Ready;

    view! {
        <section class="menu-manager">
            <div class="menu-toolbar">
                <button
                    class="save-order-btn"
                    disabled=move || !can_save()
                    on:click=on_save
                >
                    {move || if is_saving() { "Saving…" } else { "Save Order" }}
                </button>
                <Show when=is_dirty>
                    <span class="dirty-badge">"Unsaved changes"</span>
                </Show>
                <span class="toolbar-spacer"></span>
                <button
                    class="expand-btn"
                    disabled=move || !is_ready()
                    on:click=move |_| engine.update(|e| e.expand_all())
                >
                    "Expand all"
                </button>
                <button
                    class="collapse-btn"
                    disabled=move || !is_ready()
                    on:click=move |_| engine.update(|e| e.collapse_all())
                >
                    "Collapse all"
                </button>
            </div>

            {move || match load_state.get() {
                LoadState::Loading => view! {
                    <p class="menu-loading">"Loading menu…"</p>
                }.into_any(),
                LoadState::Failed(message) => view! {
                    <div class="menu-load-error">
                        <p>{format!("Could not load this menu: {}", message)}</p>
                        <button on:click=move |_| load()>"Retry"</button>
                    </div>
                }.into_any(),
                LoadState::Ready => view! {
                    <CategoryList engine=engine />
                }.into_any(),
            }}
        </section>
    }
}

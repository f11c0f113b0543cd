//! Item List Component
//!
//! Sortable items of one category. Its drag context is scoped to that
//! category, so items never move across categories.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::{create_sortable, DropEvent};
use menu_ordering::MenuOrderingEngine;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::format::format_price;
use crate::models::{CategoryId, Item, ItemId};

#[component]
pub fn ItemList(engine: RwSignal<MenuOrderingEngine>, category_id: CategoryId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let menu_id = engine.with_untracked(|e| e.menu_id().clone());
    let group = format!("items-{}-{}", menu_id, category_id);

    let sortable = {
        let category_id = category_id.clone();
        create_sortable(group.clone(), move |drop: DropEvent| {
            let from = ItemId::from(drop.from_id);
            let to = drop.to_id.map(ItemId::from);
            let proposed = engine.with_untracked(|e| {
                if e.is_saving() {
                    log::debug!("Ignoring item drop while a save is running");
                    return None;
                }
                e.item_controller(&category_id)
                    .on_drop(e.items_of(&category_id), &from, to.as_ref())
            });
            if let Some(event) = proposed {
                engine.update(|e| {
                    if let Err(err) = e.apply(event) {
                        log::warn!("Item reorder rejected: {}", err);
                    }
                });
            }
        })
    };

    let items = {
        let category_id = category_id.clone();
        move || engine.with(|e| e.items_of(&category_id).to_vec())
    };
    let is_empty = {
        let category_id = category_id.clone();
        move || engine.with(|e| e.items_of(&category_id).is_empty())
    };

    view! {
        <div class="item-list">
            <Show when=is_empty>
                <p class="empty-hint">"No items in this category."</p>
            </Show>
            <For
                each=items
                key=|item: &Item| item.id.clone()
                children=move |item: Item| {
                    let id = item.id.clone();
                    let group = group.clone();

                    let current = {
                        let category_id = category_id.clone();
                        let id = id.clone();
                        move || engine.with(|e| e.item(&category_id, &id).cloned())
                    };
                    let name = {
                        let current = current.clone();
                        Signal::derive(move || current().map(|i| i.name).unwrap_or_default())
                    };
                    let price = move || current().map(|i| i.price).unwrap_or_default();

                    let row_class = {
                        let id = id.clone();
                        move || {
                            let mut c = String::from("item-row");
                            if sortable.is_dragging(id.as_str()) { c.push_str(" dragging"); }
                            if sortable.is_over(id.as_str()) { c.push_str(" drop-target"); }
                            c
                        }
                    };
                    let on_delete = {
                        let menu_id = menu_id.clone();
                        let id = id.clone();
                        move |_: ()| {
                            if engine.with_untracked(|e| e.is_saving()) {
                                ctx.notify_error("Wait for the save to finish before deleting.");
                                return;
                            }
                            let menu_id = menu_id.clone();
                            let id = id.clone();
                            spawn_local(async move {
                                match commands::delete_item(&menu_id, &id).await {
                                    Ok(tree) => {
                                        engine.try_update(|e| e.replace_tree(tree));
                                        ctx.notify_success("Item deleted");
                                    }
                                    Err(e) => ctx.notify_error(format!("Deleting the item failed: {}", e)),
                                }
                            });
                        }
                    };

                    view! {
                        <div
                            class=row_class
                            tabindex="0"
                            data-sortable-group=group
                            data-sortable-id=id.to_string()
                            on:mousedown=sortable.on_mousedown(id.to_string())
                            on:keydown=sortable.on_keydown(id.to_string())
                        >
                            <span class="drag-handle">"⠿"</span>
                            <span class="item-name">{move || name.get()}</span>
                            <span class="item-price">{move || format_price(price())}</span>
                            <DeleteConfirmButton
                                button_class="delete-btn"
                                title=Signal::derive(move || format!("Delete item {}", name.get()))
                                on_confirm=on_delete
                            />
                        </div>
                    }
                }
            />
        </div>
    }
}

//! Category List Component
//!
//! Sortable list of a menu's categories. Each expanded category hosts its
//! own `ItemList` with a separate drag context.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::{create_sortable, DropEvent};
use menu_ordering::MenuOrderingEngine;

use crate::commands;
use crate::components::{DeleteConfirmButton, ItemList};
use crate::context::AppContext;
use crate::format::item_count_label;
use crate::models::{Category, CategoryId};

#[component]
pub fn CategoryList(engine: RwSignal<MenuOrderingEngine>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let menu_id = engine.with_untracked(|e| e.menu_id().clone());
    let group = format!("categories-{}", menu_id);

    let sortable = create_sortable(group.clone(), move |drop: DropEvent| {
        let from = CategoryId::from(drop.from_id);
        let to = drop.to_id.map(CategoryId::from);
        let proposed = engine.with_untracked(|e| {
            if e.is_saving() {
                log::debug!("Ignoring category drop while a save is running");
                return None;
            }
            e.category_controller().on_drop(e.categories(), &from, to.as_ref())
        });
        if let Some(event) = proposed {
            engine.update(|e| {
                if let Err(err) = e.apply(event) {
                    log::warn!("Category reorder rejected: {}", err);
                }
            });
        }
    });

    let categories = move || engine.with(|e| e.categories().to_vec());

    view! {
        <div class="category-list">
            <Show when=move || engine.with(|e| e.categories().is_empty())>
                <p class="empty-hint">"This menu has no categories yet."</p>
            </Show>
            <For
                each=categories
                key=|category: &Category| category.id.clone()
                children=move |category: Category| {
                    let id = category.id.clone();
                    let group = group.clone();

                    // keyed by id, so a rename only shows up through the engine
                    let name = {
                        let id = id.clone();
                        Signal::derive(move || {
                            engine.with(|e| e.category(&id).map(|c| c.name.clone()).unwrap_or_default())
                        })
                    };

                    let is_expanded = {
                        let id = id.clone();
                        move || engine.with(|e| e.is_expanded(&id))
                    };
                    let item_count = {
                        let id = id.clone();
                        move || engine.with(|e| e.items_of(&id).len())
                    };
                    let row_class = {
                        let id = id.clone();
                        move || {
                            let mut c = String::from("category-row");
                            if sortable.is_dragging(id.as_str()) { c.push_str(" dragging"); }
                            if sortable.is_over(id.as_str()) { c.push_str(" drop-target"); }
                            c
                        }
                    };
                    let toggle = {
                        let id = id.clone();
                        move |_: web_sys::MouseEvent| {
                            if sortable.drag_just_ended() {
                                return;
                            }
                            engine.update(|e| {
                                e.toggle_expanded(&id);
                            });
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
                                match commands::delete_category(&menu_id, &id).await {
                                    Ok(tree) => {
                                        engine.try_update(|e| e.replace_tree(tree));
                                        ctx.notify_success("Category deleted");
                                    }
                                    Err(e) => ctx.notify_error(format!("Deleting the category failed: {}", e)),
                                }
                            });
                        }
                    };

                    let item_list_id = id.clone();
                    view! {
                        <div
                            class=row_class
                            tabindex="0"
                            data-sortable-group=group
                            data-sortable-id=id.to_string()
                            on:mousedown=sortable.on_mousedown(id.to_string())
                            on:keydown=sortable.on_keydown(id.to_string())
                        >
                            <div class="category-header" on:click=toggle>
                                <span class="drag-handle">"⠿"</span>
                                <span class="collapse-icon">
                                    {let is_expanded = is_expanded.clone(); move || if is_expanded() { "▼" } else { "▶" }}
                                </span>
                                <span class="category-name">{move || name.get()}</span>
                                <span class="category-count">{move || item_count_label(item_count())}</span>
                                <DeleteConfirmButton
                                    button_class="delete-btn"
                                    title=Signal::derive(move || format!("Delete category {}", name.get()))
                                    on_confirm=on_delete
                                />
                            </div>
                            <Show when=is_expanded.clone()>
                                <ItemList engine=engine category_id=item_list_id.clone() />
                            </Show>
                        </div>
                    }
                }
            />
        </div>
    }
}

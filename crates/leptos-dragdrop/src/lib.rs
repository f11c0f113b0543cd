//! Leptos DragDrop Utilities
//!
//! Sortable lists for Leptos using mouse and keyboard events.
//! A movement threshold distinguishes click from drag; the drop target is
//! the row whose center is nearest to the pointer.
//!
//! Rows opt in with two attributes:
//! `data-sortable-group` (the list they belong to) and `data-sortable-id`.
//! Every group is an independent drag context: a drag started in one group
//! never reports a target from another.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Result of a finished gesture. `to_id` is `None` when the drag was
/// cancelled or ended with no row under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropEvent {
    pub from_id: String,
    pub to_id: Option<String>,
}

/// True once the pointer left the dead zone around `start`
pub fn exceeds_threshold(start: Point, now: Point) -> bool {
    (now.x - start.x).abs() > DRAG_THRESHOLD_PX || (now.y - start.y).abs() > DRAG_THRESHOLD_PX
}

/// Id of the row whose center is closest to `point`.
/// Ties go to the row listed first.
pub fn closest_center(point: Point, rows: &[(String, Rect)]) -> Option<String> {
    rows.iter()
        .map(|(id, rect)| {
            let c = rect.center();
            let dist = (c.x - point.x).powi(2) + (c.y - point.y).powi(2);
            (id, dist)
        })
        .fold(None::<(&String, f64)>, |best, (id, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((id, dist)),
        })
        .map(|(id, _)| id.clone())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Pick the focused row up, or drop the held row
    Toggle,
    Up,
    Down,
    Cancel,
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Enter" => Some(KeyAction::Toggle),
        "ArrowUp" => Some(KeyAction::Up),
        "ArrowDown" => Some(KeyAction::Down),
        "Escape" => Some(KeyAction::Cancel),
        _ => None,
    }
}

/// Whether a row's keydown handler should act on `action`.
/// Keys that bubble up from a control inside the row (a delete button, an
/// input) belong to that control. Away from a held drag only `Toggle`
/// applies.
pub fn row_handles_key(action: KeyAction, from_row: bool, holding: bool) -> bool {
    from_row && (holding || action == KeyAction::Toggle)
}

/// Neighbor of `current` in `order`, clamped to the ends of the list
pub fn keyboard_step(order: &[String], current: &str, delta: i32) -> Option<String> {
    let pos = order.iter().position(|id| id == current)?;
    let last = order.len().saturating_sub(1) as i64;
    let next = (pos as i64 + delta as i64).clamp(0, last) as usize;
    order.get(next).cloned()
}

fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Rows of `group` in document order with their viewport rectangles
fn group_rows(group: &str) -> Vec<(String, Rect)> {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let selector = format!(
        "[data-sortable-group=\"{}\"][data-sortable-id]",
        css_string(group)
    );
    let Ok(nodes) = doc.query_selector_all(&selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|el| {
            let id = el.get_attribute("data-sortable-id")?;
            let r = el.get_bounding_client_rect();
            Some((id, Rect::new(r.left(), r.top(), r.width(), r.height())))
        })
        .collect()
}

fn is_form_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target().is_some_and(|target| {
        target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
    })
}

/// Drag state of one sortable list
#[derive(Clone, Copy)]
pub struct Sortable {
    group: StoredValue<String>,
    dragging_id: RwSignal<Option<String>>,
    over_id: RwSignal<Option<String>>,
    /// mousedown seen, threshold not crossed yet
    pending: RwSignal<Option<(String, Point)>>,
    keyboard: RwSignal<bool>,
    just_ended: RwSignal<bool>,
    on_drop: Callback<DropEvent>,
}

/// Create a sortable list and bind its window listeners.
/// Listeners are removed when the owning reactive scope is disposed.
pub fn create_sortable(
    group: impl Into<String>,
    on_drop: impl Fn(DropEvent) + Send + Sync + 'static,
) -> Sortable {
    let sortable = Sortable {
        group: StoredValue::new(group.into()),
        dragging_id: RwSignal::new(None),
        over_id: RwSignal::new(None),
        pending: RwSignal::new(None),
        keyboard: RwSignal::new(false),
        just_ended: RwSignal::new(false),
        on_drop: Callback::new(on_drop),
    };

    let move_handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        sortable.track_pointer(Point::new(ev.client_x() as f64, ev.client_y() as f64));
    });
    let up_handle = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        sortable.release_pointer();
    });
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && sortable.is_active_untracked() {
            sortable.finish(None);
        }
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
        key_handle.remove();
    });

    sortable
}

impl Sortable {
    pub fn is_active(&self) -> bool {
        self.dragging_id.with(|d| d.is_some())
    }

    fn is_active_untracked(&self) -> bool {
        self.dragging_id.with_untracked(|d| d.is_some())
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging_id.with(|d| d.as_deref() == Some(id))
    }

    pub fn is_over(&self, id: &str) -> bool {
        self.is_active() && self.over_id.with(|o| o.as_deref() == Some(id))
    }

    /// True for a moment after a drop, so the trailing click can be ignored
    pub fn drag_just_ended(&self) -> bool {
        self.just_ended.get_untracked()
    }

    fn track_pointer(&self, point: Point) {
        if !self.is_active_untracked() {
            let Some((id, start)) = self.pending.get_untracked() else {
                return;
            };
            if !exceeds_threshold(start, point) {
                return;
            }
            self.keyboard.set(false);
            self.dragging_id.set(Some(id));
        }
        if self.keyboard.get_untracked() {
            return;
        }

        let over = closest_center(point, &group_rows(&self.group.get_value()));
        if over != self.over_id.get_untracked() {
            self.over_id.set(over);
        }
    }

    fn release_pointer(&self) {
        self.pending.set(None);
        if self.is_active_untracked() && !self.keyboard.get_untracked() {
            let to = self.over_id.get_untracked();
            self.finish(to);
        }
    }

    fn finish(&self, to_id: Option<String>) {
        let from = self.dragging_id.get_untracked();
        self.dragging_id.set(None);
        self.over_id.set(None);
        self.pending.set(None);
        self.keyboard.set(false);

        if let Some(from_id) = from {
            self.just_ended.set(true);
            let just_ended = self.just_ended;
            set_timeout(move || just_ended.set(false), Duration::from_millis(100));
            self.on_drop.run(DropEvent { from_id, to_id });
        }
    }

    /// Mousedown handler for a row: records a pending drag with its start
    /// position. Does not bubble, so nested lists stay independent.
    pub fn on_mousedown(&self, id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
        let sortable = *self;
        move |ev: web_sys::MouseEvent| {
            if ev.button() != 0 || is_form_control(&ev) {
                return;
            }
            ev.stop_propagation();
            let start = Point::new(ev.client_x() as f64, ev.client_y() as f64);
            sortable.pending.set(Some((id.clone(), start)));
        }
    }

    /// Keydown handler for a focusable row
    pub fn on_keydown(&self, id: String) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static {
        let sortable = *self;
        move |ev: web_sys::KeyboardEvent| {
            let Some(action) = key_action(&ev.key()) else {
                return;
            };
            let holding = sortable.is_active_untracked() && sortable.keyboard.get_untracked();
            let from_row = ev.target() == ev.current_target();
            if !row_handles_key(action, from_row, holding) {
                return;
            }
            ev.prevent_default();
            ev.stop_propagation();

            match action {
                KeyAction::Toggle if holding => {
                    let to = sortable.over_id.get_untracked();
                    sortable.finish(to);
                }
                KeyAction::Toggle => {
                    sortable.keyboard.set(true);
                    sortable.over_id.set(Some(id.clone()));
                    sortable.dragging_id.set(Some(id.clone()));
                }
                KeyAction::Up | KeyAction::Down => {
                    let delta = if action == KeyAction::Up { -1 } else { 1 };
                    let order: Vec<String> = group_rows(&sortable.group.get_value())
                        .into_iter()
                        .map(|(row_id, _)| row_id)
                        .collect();
                    let current = sortable.over_id.get_untracked().unwrap_or_else(|| id.clone());
                    if let Some(next) = keyboard_step(&order, &current, delta) {
                        sortable.over_id.set(Some(next));
                    }
                }
                KeyAction::Cancel => sortable.finish(None),
            }
        }
    }
}

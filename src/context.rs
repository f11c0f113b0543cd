//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::{Toast, ToastKind};

const TOAST_VISIBLE_MS: u32 = 4000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the menu list - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the menu list - write
    set_reload_trigger: WriteSignal<u32>,
    /// Currently shown toast
    pub toast: ReadSignal<Option<Toast>>,
    set_toast: WriteSignal<Option<Toast>>,
    next_toast_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        toast: (ReadSignal<Option<Toast>>, WriteSignal<Option<Toast>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toast: toast.0,
            set_toast: toast.1,
            next_toast_id: StoredValue::new(0),
        }
    }

    /// Trigger a reload of the menu list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        let message = message.into();
        let _ = rolling_logger::info(&message);
        self.show_toast(ToastKind::Success, message);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        let message = message.into();
        let _ = rolling_logger::error(&message);
        self.show_toast(ToastKind::Error, message);
    }

    pub fn dismiss_toast(&self) {
        self.set_toast.set(None);
    }

    fn show_toast(&self, kind: ToastKind, message: String) {
        self.next_toast_id.update_value(|id| *id += 1);
        let id = self.next_toast_id.get_value();
        self.set_toast.set(Some(Toast { id, kind, message }));

        // only hide the toast this call showed
        let toast = self.toast;
        let set_toast = self.set_toast;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_VISIBLE_MS).await;
            if toast.with_untracked(|t| t.as_ref().map(|t| t.id)) == Some(id) {
                set_toast.set(None);
            }
        });
    }
}

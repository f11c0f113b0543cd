//! Toast Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::ToastKind;

/// Renders the current toast, if any. Click to dismiss.
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    move || {
        ctx.toast.get().map(|toast| {
            let class = match toast.kind {
                ToastKind::Success => "toast success",
                ToastKind::Error => "toast error",
            };
            view! {
                <div class=class role="status" on:click=move |_| ctx.dismiss_toast()>
                    {toast.message}
                </div>
            }
        })
    }
}

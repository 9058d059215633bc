//! Toast rendering the notifier's current message.

use leptos::prelude::*;

use crate::app::use_session;
use crate::state::notify::Notification;

/// Fixed-position toast. Auto-dismiss is driven by the notifier; the close
/// button dismisses early.
#[component]
pub fn Toast() -> impl IntoView {
    let toast = expect_context::<RwSignal<Option<Notification>>>();
    let session = use_session();

    let on_close = move |_| session.get_value().notifier().close();

    view! {
        {move || {
            toast
                .get()
                .filter(|n| n.visible)
                .map(|n| {
                    let class = format!("toast toast--{}", n.severity.as_str());
                    view! {
                        <div class=class role="status" aria-live="polite">
                            <span class="toast__message">{n.message}</span>
                            <button class="toast__close" on:click=on_close title="Dismiss">
                                "✕"
                            </button>
                        </div>
                    }
                })
        }}
    }
}

//! Landing page for a signed-in user.

use leptos::prelude::*;

use crate::app::use_session;
use crate::state::auth::AuthState;

/// Greets the user and offers logout. Only reachable through the gate, so a
/// user is normally present; the fallback covers the instant after logout.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = use_session();

    let greeting = move || {
        auth.with(|state| match (state.username(), &state.user) {
            (Some(name), Some(user)) => format!("Welcome, {name} ({})", user.role.as_str()),
            _ => "Welcome".to_owned(),
        })
    };

    let on_logout = move |_| session.get_value().logout();

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>{greeting}</h1>
                <Show when=move || auth.with(|s| s.user.is_some())>
                    <button class="btn btn--secondary" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </header>
        </div>
    }
}

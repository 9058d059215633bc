//! Gate wrapping routed content until a user is signed in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendering follows `AuthGate::view`: nothing while the startup check runs,
//! content under the credential modal when signed out, plain content when
//! signed in or on an allow-listed route. Content stays mounted across state
//! changes so routes do not remount when the user signs in.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::auth_modal::AuthModal;
use crate::state::auth::AuthState;
use crate::state::gate::AuthGate;

#[component]
pub fn Gate(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let gate = expect_context::<AuthGate>();
    let location = use_location();

    let gate_view = Memo::new(move |_| gate.view(auth.with(AuthState::gate), &location.pathname.get()));
    let inert = move || gate_view.get().content_inert();

    view! {
        <Show
            when=move || gate_view.get().renders_content()
            fallback=|| view! { <div class="auth-gate__checking" aria-busy="true"></div> }
        >
            <div
                class="auth-gate__content"
                class:auth-gate__content--inert=inert
                inert=inert
                aria-hidden=move || if inert() { "true" } else { "false" }
            >
                {children()}
            </div>
            <Show when=move || gate_view.get().shows_modal()>
                <AuthModal/>
            </Show>
        </Show>
    }
}

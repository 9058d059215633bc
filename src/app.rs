//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wires the session store, notifier and gate policy into Leptos context
//! and starts the one-time token verification. Pages and components reach the
//! store through [`use_session`] and observe it through the
//! `RwSignal<AuthState>` and `RwSignal<Option<Notification>>` contexts.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{NavigateOptions, StaticSegment};

use crate::components::auth_gate::Gate;
use crate::components::toast::Toast;
use crate::config::ClientConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{home::HomePage, reset_password::ResetPasswordPage};
use crate::state::auth::AuthState;
use crate::state::gate::AuthGate;
use crate::state::notify::{Notification, Notifier};
use crate::state::session::SessionStore;
use crate::util::token_store::LocalStorageTokens;
use crate::util::validation::Validator;

/// Session store as wired in the browser.
pub type AppStore = SessionStore<HttpAuthApi, LocalStorageTokens>;

/// Copyable context handle to the store; event handlers call `get_value()`.
pub type SessionHandle = StoredValue<Rc<AppStore>, LocalStorage>;

/// The session store provided by [`App`].
///
/// # Panics
///
/// Panics when called outside the `App` tree.
pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="storefront" href="/pkg/storefront.css"/>
        <Title text="Storefront"/>

        <Router>
            <Shell/>
        </Router>
    }
}

/// Everything that needs the router: the store navigates through it.
#[component]
fn Shell() -> impl IntoView {
    let config = ClientConfig::from_env().unwrap_or_else(|err| {
        log::warn!("config: {err}; using defaults");
        ClientConfig::default()
    });

    let auth = RwSignal::new(AuthState::default());
    let toast = RwSignal::new(None::<Notification>);

    let notifier = Notifier::new(config.toast_duration_ms);
    notifier.subscribe(move |current| toast.set(current.cloned()));

    let api = HttpAuthApi::new(config.api_base_url.clone());
    log::debug!("session: api at {}", api.base_url());

    let navigate = use_navigate();
    let store = Rc::new(SessionStore::new(
        api,
        LocalStorageTokens,
        notifier,
        move |path: &str| navigate(path, NavigateOptions::default()),
    ));
    store.subscribe(move |session| auth.set(AuthState::from(session)));

    provide_context(auth);
    provide_context(toast);
    provide_context(AuthGate::default());
    provide_context(Validator::from_config(&config));
    provide_context::<SessionHandle>(StoredValue::new_local(store.clone()));

    leptos::task::spawn_local(async move {
        store.initialize().await;
    });

    view! {
        <Gate>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
            </Routes>
        </Gate>
        <Toast/>
    }
}

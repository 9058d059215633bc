//! Credential modal shown over gated content.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by `Gate` only while the visitor is signed out. It has no close
//! control: Escape is swallowed and backdrop clicks do nothing, so the only
//! way out is a successful login or signup. Form state lives in a signal
//! owned by this component; a submission still in flight when it unmounts is
//! discarded by the submit flow.

use leptos::prelude::*;

use crate::app::use_session;
use crate::net::types::Role;
use crate::state::auth_flow::submit_auth_form;
use crate::state::auth_form::{AuthForm, AuthMode, Field};
use crate::util::validation::Validator;

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Username => "Username",
        Field::Email => "Email",
        Field::Password => "Password",
        Field::WhatsappNumber => "WhatsApp number",
    }
}

fn field_input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Password => "password",
        Field::WhatsappNumber => "tel",
        Field::Username => "text",
    }
}

fn title(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Sign in",
        AuthMode::Signup => "Create account",
        AuthMode::Forgot => "Reset password",
    }
}

fn submit_label(mode: AuthMode, submitting: bool) -> &'static str {
    match (mode, submitting) {
        (_, true) => "Please wait...",
        (AuthMode::Login, false) => "Login",
        (AuthMode::Signup, false) => "Sign up",
        (AuthMode::Forgot, false) => "Send reset link",
    }
}

#[component]
pub fn AuthModal() -> impl IntoView {
    let session = use_session();
    let validator = use_context::<Validator>().unwrap_or_default();
    let form = RwSignal::new(AuthForm::new(validator));
    let mode = Memo::new(move |_| form.with(AuthForm::mode));
    let submitting = Memo::new(move |_| form.with(AuthForm::is_submitting));
    // Inputs are rebuilt only when the field set changes, never per keystroke.
    let fields = Memo::new(move |_| form.with(AuthForm::fields));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let store = session.get_value();
        leptos::task::spawn_local(async move {
            let outcome = submit_auth_form(&form, store.as_ref()).await;
            log::debug!("auth modal: submit settled: {outcome:?}");
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            ev.stop_propagation();
        }
    };

    let on_role = move |ev| {
        if let Some(role) = Role::parse(&event_target_value(&ev)) {
            form.update(|f| f.set_role(role));
        }
    };

    view! {
        <div class="auth-modal__backdrop">
            <div class="auth-modal" role="dialog" aria-modal="true" tabindex="0" on:keydown=on_keydown>
                <h2 class="auth-modal__title">{move || title(mode.get())}</h2>
                <form class="auth-modal__form" on:submit=on_submit novalidate=true>
                    {move || {
                        fields.get().iter().map(|&field| view! { <FieldInput form field/> }).collect_view()
                    }}
                    <Show when=move || mode.get() == AuthMode::Signup>
                        <label class="auth-modal__field">
                            <span>"I am a"</span>
                            <select
                                class="auth-modal__input"
                                prop:value=move || form.with(|f| f.role().as_str())
                                on:change=on_role
                            >
                                {Role::SELF_SERVICE
                                    .iter()
                                    .map(|role| view! { <option value=role.as_str()>{role.as_str()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    </Show>
                    <button
                        class="auth-modal__submit"
                        type="submit"
                        disabled=move || submitting.get() || !form.with(AuthForm::can_submit)
                    >
                        {move || submit_label(mode.get(), submitting.get())}
                    </button>
                </form>
                <div class="auth-modal__links">
                    <Show when=move || mode.get() == AuthMode::Login>
                        <button class="auth-modal__link" on:click=move |_| { form.update(|f| { f.show_forgot(); }); }>
                            "Forgot password?"
                        </button>
                    </Show>
                    <Show
                        when=move || mode.get() == AuthMode::Forgot
                        fallback=move || {
                            view! {
                                <button class="auth-modal__link" on:click=move |_| { form.update(|f| { f.toggle_signup(); }); }>
                                    {move || {
                                        if mode.get() == AuthMode::Signup {
                                            "Already have an account? Login"
                                        } else {
                                            "New here? Create an account"
                                        }
                                    }}
                                </button>
                            }
                        }
                    >
                        <button class="auth-modal__link" on:click=move |_| { form.update(|f| { f.back_to_login(); }); }>
                            "Back to login"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// One labelled input bound to `field`, with its inline error below.
#[component]
fn FieldInput(form: RwSignal<AuthForm>, field: Field) -> impl IntoView {
    let error = move || form.with(|f| f.error(field).map(str::to_owned));

    view! {
        <label class="auth-modal__field">
            <span>{field_label(field)}</span>
            <input
                class="auth-modal__input"
                class:auth-modal__input--invalid=move || error().is_some()
                type=field_input_type(field)
                prop:value=move || form.with(|f| f.value(field).to_owned())
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
            />
            {move || error().map(|msg| view! { <p class="auth-modal__error">{msg}</p> })}
        </label>
    }
}

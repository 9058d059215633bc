//! Reset-password page opened from emailed links (`/reset-password?token=...`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The gate allow-lists this route, so it works signed out. On success the
//! page returns to `/`, where a signed-out visitor lands on the login modal.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::use_session;
use crate::state::auth_flow::{SubmitOutcome, submit_reset_password};
use crate::state::reset_form::{ResetField, ResetPasswordForm};
use crate::state::session::ROOT_PATH;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let token = use_query_map().with_untracked(|q| q.get("token"));
    let form = RwSignal::new(ResetPasswordForm::new(token));
    let submitting = Memo::new(move |_| form.with(ResetPasswordForm::is_submitting));
    let no_token = move || !form.with(ResetPasswordForm::has_token);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let store = session.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if submit_reset_password(&form, store.as_ref()).await == SubmitOutcome::Succeeded {
                navigate(ROOT_PATH, NavigateOptions::default());
            }
        });
    };

    let error = move |field| form.with(|f| f.error(field).map(str::to_owned));

    view! {
        <div class="reset-page">
            <div class="reset-card">
                <h1>"Choose a new password"</h1>
                {move || error(ResetField::Token).map(|msg| view! { <p class="reset-card__error">{msg}</p> })}
                <form class="reset-form" on:submit=on_submit novalidate=true>
                    <label class="reset-form__field">
                        <span>"New password"</span>
                        <input
                            class="reset-form__input"
                            type="password"
                            disabled=no_token
                            prop:value=move || form.with(|f| f.value(ResetField::NewPassword).to_owned())
                            on:input=move |ev| form.update(|f| f.set_password(event_target_value(&ev)))
                        />
                        {move || error(ResetField::NewPassword).map(|msg| view! { <p class="reset-form__error">{msg}</p> })}
                    </label>
                    <label class="reset-form__field">
                        <span>"Confirm password"</span>
                        <input
                            class="reset-form__input"
                            type="password"
                            disabled=no_token
                            prop:value=move || form.with(|f| f.value(ResetField::ConfirmPassword).to_owned())
                            on:input=move |ev| form.update(|f| f.set_confirmation(event_target_value(&ev)))
                        />
                        {move || error(ResetField::ConfirmPassword).map(|msg| view! { <p class="reset-form__error">{msg}</p> })}
                    </label>
                    <button
                        class="reset-form__submit"
                        type="submit"
                        disabled=move || submitting.get() || !form.with(ResetPasswordForm::can_submit)
                    >
                        {move || if submitting.get() { "Resetting..." } else { "Reset password" }}
                    </button>
                </form>
                <a class="reset-card__back" href=ROOT_PATH>
                    "Back to login"
                </a>
            </div>
        </div>
    }
}

//! Login page: administrator sign-in and password change.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page either resumes a live session (straight to the
//! dashboard) or fetches the administrator list once. Sign-in writes the
//! session pair to `localStorage` and redirects after a short delay.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use gate::AdministratorRecord;
use gate::StoreError;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::firestore::FirestoreStore;
use crate::state::login::{LoginState, Notice, PasswordField};
use crate::util::clock::{self, LOGIN_REDIRECT_DELAY};
use crate::util::storage::session_store;

fn notice_class(notice: Option<&Notice>) -> String {
    notice.map_or_else(
        || "login-notice".to_owned(),
        |n| format!("login-notice login-notice--{}", n.level.css_modifier()),
    )
}

fn selected_admin_label(admin: Option<&AdministratorRecord>) -> String {
    admin.map_or_else(
        || "No administrator selected".to_owned(),
        |a| format!("{} ({})", a.name, a.email),
    )
}

fn submit_label(loading_admins: bool) -> &'static str {
    if loading_admins { "Loading admins..." } else { "Sign in" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = RwSignal::new(LoginState::default());
    let doc_store = StoredValue::new(None::<FirestoreStore>);
    let navigate = use_navigate();

    // Mount: resume a live session, otherwise load the administrator list.
    let navigate_resume = navigate.clone();
    Effect::new(move || {
        if gate::session_gate::resume_session(&session_store(), clock::now_ms()) {
            log!("Valid session found, redirecting to dashboard");
            navigate_resume("/dashboard", NavigateOptions::default());
            return;
        }
        leptos::task::spawn_local(async move {
            let result = match crate::net::api::admin_store().await {
                Ok(store) => {
                    let admins = gate::matcher::fetch_admins(&store).await;
                    doc_store.set_value(Some(store));
                    admins
                }
                Err(e) => Err(e),
            };
            match &result {
                Ok(admins) => log!("Loaded {} admin users", admins.len()),
                Err(e) => warn!("Error fetching admin users: {e}"),
            }
            state.update(|s| s.admins_loaded(result));
        });
    });

    let navigate_dashboard = navigate.clone();
    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !state.with_untracked(LoginState::can_submit) {
            return;
        }
        let sessions = session_store();
        let now = clock::now_ms();
        let mut rng = clock::token_rng();
        let Some(session) = state.try_update(|s| s.sign_in(&sessions, now, &mut rng)).flatten() else {
            warn!("Login rejected");
            return;
        };
        log!("Login successful for: {}", session.record.email);
        let navigate = navigate_dashboard.clone();
        leptos::task::spawn_local(async move {
            clock::sleep(LOGIN_REDIRECT_DELAY).await;
            navigate("/dashboard", NavigateOptions::default());
        });
    };

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((admin_id, new_password)) = state.try_update(LoginState::begin_password_change).flatten() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = match doc_store.get_value() {
                Some(store) => gate::matcher::write_password(&store, &admin_id, &new_password).await,
                None => Err(StoreError::Config("document store unavailable".to_owned())),
            };
            match &result {
                Ok(()) => log!("Password changed for admin {admin_id}"),
                Err(e) => warn!("Error changing password: {e}"),
            }
            state.update(|s| s.finish_password_change(&admin_id, &new_password, result));
        });
    };

    let changing = move || state.with(LoginState::is_changing_password);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin Portal"</h1>
                <p class="login-card__subtitle">"Sign in to your administrator account"</p>
                <p class="login-card__hint">"Stay logged in for 30 days"</p>

                <Show when=move || state.with(|s| s.notice.is_some())>
                    <p class=move || state.with(|s| notice_class(s.notice.as_ref()))>
                        {move || state.with(|s| s.notice.as_ref().map(|n| n.text.clone()))}
                    </p>
                </Show>

                <form class="login-form" hidden=changing on:submit=on_sign_in>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="Enter your email"
                        prop:value=move || state.with(|s| s.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.email = value);
                        }
                    />
                    <PasswordInput
                        state=state
                        field=PasswordField::Login
                        placeholder="Enter your password"
                        autocomplete="current-password"
                    />
                    <Show when=move || state.with(|s| s.error.is_some())>
                        <p class="login-message login-message--error">
                            {move || state.with(|s| s.error.clone())}
                        </p>
                    </Show>
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || !state.with(LoginState::can_submit)
                    >
                        {move || submit_label(state.with(|s| s.matcher.is_loading()))}
                    </button>
                    <p class="login-card__subtitle">
                        "Want to change the password? "
                        <button
                            class="login-link"
                            type="button"
                            on:click=move |_| state.update(LoginState::open_change_password)
                        >
                            "Change PW"
                        </button>
                    </p>
                </form>

                <form class="login-form" hidden=move || !changing() on:submit=on_change_password>
                    <h2>"Change Password"</h2>
                    <p class="login-card__subtitle">
                        {move || state.with(|s| selected_admin_label(s.selected_admin()))}
                    </p>
                    <PasswordInput
                        state=state
                        field=PasswordField::Current
                        placeholder="Current password"
                        autocomplete="current-password"
                    />
                    <PasswordInput
                        state=state
                        field=PasswordField::New
                        placeholder="New password"
                        autocomplete="new-password"
                    />
                    <PasswordInput
                        state=state
                        field=PasswordField::Confirm
                        placeholder="Confirm new password"
                        autocomplete="new-password"
                    />
                    <button class="login-button" type="submit" disabled=move || state.with(|s| s.busy)>
                        {move || if state.with(|s| s.busy) { "Updating..." } else { "Change Password" }}
                    </button>
                    <button
                        class="login-button login-button--secondary"
                        type="button"
                        on:click=move |_| state.update(LoginState::cancel_change_password)
                    >
                        "Cancel"
                    </button>
                </form>
            </div>
        </div>
    }
}

/// Password input with a show/hide toggle bound to one [`PasswordField`].
#[component]
fn PasswordInput(
    state: RwSignal<LoginState>,
    field: PasswordField,
    placeholder: &'static str,
    autocomplete: &'static str,
) -> impl IntoView {
    view! {
        <div class="login-password">
            <input
                class="login-input"
                type=move || state.with(|s| s.visibility(field).input_type())
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || state.with(|s| s.field_value(field).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.set_field_value(field, value));
                }
            />
            <button
                class="login-password__toggle"
                type="button"
                on:click=move |_| state.update(|s| s.toggle_visibility(field))
            >
                {move || state.with(|s| s.visibility(field).toggle_label())}
            </button>
        </div>
    }
}

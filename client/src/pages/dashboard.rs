//! Dashboard: protected content behind the session gate.
//!
//! The gate runs once on mount after [`AUTH_CHECK_DELAY`]. Until it resolves
//! only a status line renders; an expired or missing session sends the
//! visitor to `/login`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use gate::session::SessionRecord;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{GatePhase, days_remaining};
use crate::util::clock::{self, AUTH_CHECK_DELAY};
use crate::util::storage::session_store;

fn greeting(record: &SessionRecord) -> String {
    if record.name.is_empty() {
        format!("Welcome, {}", record.email)
    } else {
        format!("Welcome, {}", record.name)
    }
}

fn expiry_text(days: i64) -> String {
    match days {
        0 => "Session expires today".to_owned(),
        1 => "Session expires in 1 day".to_owned(),
        n => format!("Session expires in {n} days"),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let phase = RwSignal::new(GatePhase::default());
    let navigate = use_navigate();

    let navigate_gate = navigate.clone();
    Effect::new(move || {
        let navigate = navigate_gate.clone();
        leptos::task::spawn_local(async move {
            clock::sleep(AUTH_CHECK_DELAY).await;
            let decision = gate::session_gate::check_auth(&session_store(), clock::now_ms());
            let next = GatePhase::from(decision);
            if next == GatePhase::RedirectingToLogin {
                log!("No valid session, redirecting to login");
                navigate("/login", NavigateOptions::default());
            }
            phase.set(next);
        });
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        gate::session_gate::logout(&session_store());
        log!("Logged out");
        phase.set(GatePhase::RedirectingToLogin);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="dashboard-page">
            <Show
                when=move || phase.with(|p| p.session().is_some())
                fallback=move || view! {
                    <p class="dashboard-status">{move || phase.with(GatePhase::status_text)}</p>
                }
            >
                <header class="dashboard-header">
                    <h1>"Admin Dashboard"</h1>
                    <button class="login-button login-button--secondary" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </header>
                <section class="dashboard-card">
                    <h2>{move || phase.with(|p| p.session().map(|s| greeting(&s.record)))}</h2>
                    <dl class="dashboard-details">
                        <dt>"Email"</dt>
                        <dd>{move || phase.with(|p| p.session().map(|s| s.record.email.clone()))}</dd>
                        <dt>"Role"</dt>
                        <dd>{move || phase.with(|p| p.session().map(|s| s.record.role.clone()))}</dd>
                    </dl>
                    <p class="dashboard-expiry">
                        {move || {
                            phase.with(|p| p.session().map(|s| expiry_text(days_remaining(s, clock::now_ms()))))
                        }}
                    </p>
                </section>
            </Show>
        </div>
    }
}

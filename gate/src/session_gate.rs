//! Session Gate: decides whether a stored session admits the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard runs [`check_auth`] once per mount; the login page runs
//! [`resume_session`] on mount to skip the form when a live session exists.
//! Neither re-checks while the page stays open, so a session that expires
//! mid-visit is only caught on the next navigation.

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod session_gate_test;

use crate::session::{SessionStore, StoredPair, StoredSession};

/// What the stored pair looks like at `now`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// One or both keys are absent.
    Missing,
    /// Both keys present but at least one does not parse.
    Unreadable,
    /// Both keys present but `now >= expiry`.
    Expired,
    Active(StoredSession),
}

/// Classify the stored session without modifying storage.
pub fn session_status(store: &impl SessionStore, now_ms: i64) -> SessionStatus {
    match store.read() {
        StoredPair::Missing => SessionStatus::Missing,
        StoredPair::Unreadable => SessionStatus::Unreadable,
        StoredPair::Present(session) if session.is_expired(now_ms) => SessionStatus::Expired,
        StoredPair::Present(session) => SessionStatus::Active(session),
    }
}

/// Outcome of a dashboard auth check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Authenticated(StoredSession),
    RedirectToLogin,
}

/// Dashboard entry check.
///
/// Missing pair redirects. An expired or unreadable pair is cleared and
/// redirects. A live pair authenticates.
pub fn check_auth(store: &impl SessionStore, now_ms: i64) -> GateDecision {
    match session_status(store, now_ms) {
        SessionStatus::Active(record) => GateDecision::Authenticated(record),
        SessionStatus::Expired | SessionStatus::Unreadable => {
            store.clear();
            GateDecision::RedirectToLogin
        }
        SessionStatus::Missing => GateDecision::RedirectToLogin,
    }
}

/// Login-page mount check. Returns `true` when a live session exists and the
/// form should be skipped. An expired or unreadable pair is cleared; a
/// partial pair is left untouched.
pub fn resume_session(store: &impl SessionStore, now_ms: i64) -> bool {
    match session_status(store, now_ms) {
        SessionStatus::Active(_) => true,
        SessionStatus::Expired | SessionStatus::Unreadable => {
            store.clear();
            false
        }
        SessionStatus::Missing => false,
    }
}

/// Drop the local session pair.
pub fn logout(store: &impl SessionStore) {
    store.clear();
}

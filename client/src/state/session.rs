//! Dashboard gate phase.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use gate::session::{SESSION_TTL_MS, StoredSession};
use gate::session_gate::GateDecision;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// `CheckingAuth → Authenticated | RedirectingToLogin`.
///
/// `RedirectingToLogin` is terminal; navigation takes over from there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GatePhase {
    #[default]
    CheckingAuth,
    Authenticated(StoredSession),
    RedirectingToLogin,
}

impl From<GateDecision> for GatePhase {
    fn from(decision: GateDecision) -> Self {
        match decision {
            GateDecision::Authenticated(session) => Self::Authenticated(session),
            GateDecision::RedirectToLogin => Self::RedirectingToLogin,
        }
    }
}

impl GatePhase {
    pub fn session(&self) -> Option<&StoredSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::CheckingAuth | Self::RedirectingToLogin => None,
        }
    }

    /// Placeholder text while protected content is withheld.
    pub fn status_text(&self) -> &'static str {
        match self {
            Self::CheckingAuth => "Checking session...",
            Self::Authenticated(_) => "",
            Self::RedirectingToLogin => "Redirecting to login...",
        }
    }
}

/// Whole days left before `session` expires, rounded up; zero once expired.
pub fn days_remaining(session: &StoredSession, now_ms: i64) -> i64 {
    let left = session.expires_at_ms.saturating_sub(now_ms).clamp(0, SESSION_TTL_MS);
    (left + DAY_MS - 1) / DAY_MS
}

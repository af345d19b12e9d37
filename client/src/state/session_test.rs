use gate::session::SessionRecord;

use super::*;

fn session(expires_at_ms: i64) -> StoredSession {
    StoredSession {
        record: SessionRecord {
            email: "ops@example.com".to_owned(),
            name: "Ops".to_owned(),
            role: "owner".to_owned(),
            logged_in: true,
            login_time: 0,
            token: "token_abcdefghi_0".to_owned(),
        },
        expires_at_ms,
    }
}

#[test]
fn gate_phase_starts_checking() {
    assert_eq!(GatePhase::default(), GatePhase::CheckingAuth);
    assert!(GatePhase::default().session().is_none());
}

#[test]
fn gate_phase_from_decision() {
    let s = session(10);
    assert_eq!(
        GatePhase::from(GateDecision::Authenticated(s.clone())),
        GatePhase::Authenticated(s.clone())
    );
    assert_eq!(GatePhase::from(GateDecision::RedirectToLogin), GatePhase::RedirectingToLogin);
    assert_eq!(GatePhase::Authenticated(s.clone()).session(), Some(&s));
}

#[test]
fn status_text_per_phase() {
    assert_eq!(GatePhase::CheckingAuth.status_text(), "Checking session...");
    assert_eq!(GatePhase::RedirectingToLogin.status_text(), "Redirecting to login...");
}

#[test]
fn days_remaining_rounds_up_and_floors_at_zero() {
    assert_eq!(days_remaining(&session(SESSION_TTL_MS), 0), 30);
    assert_eq!(days_remaining(&session(DAY_MS + 1), 0), 2);
    assert_eq!(days_remaining(&session(DAY_MS), 0), 1);
    assert_eq!(days_remaining(&session(100), 100), 0);
    assert_eq!(days_remaining(&session(100), 5_000), 0);
}

use futures::executor::block_on;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;
use crate::session::{KvSessionStore, MemoryStorage, SESSION_TTL_MS};
use crate::store::{Document, MemoryDocumentStore};

fn admin_doc(id: &str, email: &str, password: &str, name: &str) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("email".to_owned(), email.to_owned());
    fields.insert("password".to_owned(), password.to_owned());
    fields.insert("name".to_owned(), name.to_owned());
    fields.insert("role".to_owned(), "admin".to_owned());
    Document { id: id.to_owned(), fields }
}

fn seeded_store() -> MemoryDocumentStore {
    let store = MemoryDocumentStore::new();
    store.seed(
        ADMIN_COLLECTION,
        vec![
            admin_doc("a1", "Ops@Example.com", "opsPass1", "Ops"),
            admin_doc("a2", "dev@example.com", "devPass2", "Dev"),
        ],
    );
    store
}

fn loaded_matcher() -> (CredentialMatcher, MemoryDocumentStore) {
    let store = seeded_store();
    let mut matcher = CredentialMatcher::new();
    let count = block_on(matcher.load_admins(&store)).expect("load");
    assert_eq!(count, 2);
    (matcher, store)
}

fn change(current: &str, new: &str, confirm: &str) -> PasswordChange {
    PasswordChange { current: current.to_owned(), new: new.to_owned(), confirm: confirm.to_owned() }
}

// =============================================================
// Loading
// =============================================================

#[test]
fn new_matcher_starts_loading() {
    let matcher = CredentialMatcher::new();
    assert!(matcher.is_loading());
    assert!(matcher.admins().is_empty());
}

#[test]
fn load_admins_keeps_store_order() {
    let (matcher, _) = loaded_matcher();
    let ids = matcher.admins().iter().map(|a| a.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["a1", "a2"]);
}

#[test]
fn load_failure_marks_roster_failed_and_rejects_sign_in() {
    let store = seeded_store();
    store.fail_with(StoreError::Transport("offline".to_owned()));
    let mut matcher = CredentialMatcher::new();

    let err = block_on(matcher.load_admins(&store)).expect_err("load should fail");
    assert_eq!(err, StoreError::Transport("offline".to_owned()));
    assert!(matches!(matcher.roster(), AdminRoster::Failed(_)));
    assert_eq!(
        matcher.authenticate("dev@example.com", "devPass2"),
        Err(AuthError::AdminsUnavailable)
    );
}

#[test]
fn apply_loaded_recovers_failed_roster() {
    let mut matcher = CredentialMatcher::new();
    matcher.apply_loaded(Err(StoreError::Decode("bad".to_owned())));
    let admins = block_on(fetch_admins(&seeded_store())).expect("fetch");
    matcher.apply_loaded(Ok(admins));
    assert!(matcher.authenticate("dev@example.com", "devPass2").is_ok());
}

// =============================================================
// Authenticate
// =============================================================

#[test]
fn authenticate_matches_email_any_case_and_exact_password() {
    let (matcher, _) = loaded_matcher();
    let admin = matcher.authenticate("OPS@example.COM", "opsPass1").expect("match");
    assert_eq!(admin.id, "a1");
}

#[test]
fn authenticate_rejects_wrong_password_case() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(
        matcher.authenticate("ops@example.com", "OPSPASS1"),
        Err(AuthError::InvalidCredentials)
    );
}

#[test]
fn authenticate_does_not_distinguish_unknown_email() {
    let (matcher, _) = loaded_matcher();
    let unknown = matcher.authenticate("nobody@example.com", "opsPass1");
    let wrong_pw = matcher.authenticate("ops@example.com", "nope");
    assert_eq!(unknown, wrong_pw);
}

#[test]
fn authenticate_rejects_cross_account_pairing() {
    let (matcher, _) = loaded_matcher();
    assert!(matcher.authenticate("ops@example.com", "devPass2").is_err());
}

#[test]
fn authenticate_requires_both_fields() {
    let (matcher, _) = loaded_matcher();
    let missing = Err(AuthError::Validation(ValidationError::MissingCredentials));
    assert_eq!(matcher.authenticate("", "opsPass1"), missing);
    assert_eq!(matcher.authenticate("ops@example.com", ""), missing);
    assert_eq!(matcher.authenticate("", ""), missing);
}

#[test]
fn authenticate_missing_fields_checked_before_roster() {
    let matcher = CredentialMatcher::new();
    assert_eq!(
        matcher.authenticate("", ""),
        Err(AuthError::Validation(ValidationError::MissingCredentials))
    );
}

#[test]
fn authenticate_first_match_wins_on_duplicates() {
    let store = MemoryDocumentStore::new();
    store.seed(
        ADMIN_COLLECTION,
        vec![admin_doc("first", "x@y.z", "same-pw", "First"), admin_doc("second", "X@Y.Z", "same-pw", "Second")],
    );
    let mut matcher = CredentialMatcher::new();
    block_on(matcher.load_admins(&store)).expect("load");
    assert_eq!(matcher.authenticate("x@y.z", "same-pw").expect("match").id, "first");
}

// =============================================================
// Sign in
// =============================================================

#[test]
fn sign_in_persists_session_with_thirty_day_expiry() {
    let (matcher, _) = loaded_matcher();
    let sessions = KvSessionStore::new(MemoryStorage::new());
    let mut rng = SmallRng::seed_from_u64(1);

    let session = matcher
        .sign_in(&sessions, "dev@example.com", "devPass2", 5_000, &mut rng)
        .expect("sign in");

    assert_eq!(session.expires_at_ms, 5_000 + SESSION_TTL_MS);
    assert_eq!(session.record.email, "dev@example.com");
    assert_eq!(session.record.name, "Dev");
    assert!(session.record.logged_in);
    assert_eq!(session.record.login_time, 5_000);
    assert!(session.record.token.starts_with("token_"));
    assert!(session.record.token.ends_with("_5000"));
    assert_eq!(sessions.load(), Some(session));
}

#[test]
fn failed_sign_in_writes_nothing() {
    let (matcher, _) = loaded_matcher();
    let sessions = KvSessionStore::new(MemoryStorage::new());
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(matcher.sign_in(&sessions, "dev@example.com", "wrong", 1, &mut rng).is_err());
    assert_eq!(sessions.load(), None);
}

// =============================================================
// Change password
// =============================================================

#[test]
fn select_for_change_prefers_typed_email_then_first() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(matcher.select_for_change("DEV@example.com").map(|a| a.id.as_str()), Some("a2"));
    assert_eq!(matcher.select_for_change("").map(|a| a.id.as_str()), Some("a1"));
    assert_eq!(matcher.select_for_change("stranger@x.io").map(|a| a.id.as_str()), Some("a1"));
    assert!(CredentialMatcher::new().select_for_change("").is_none());
}

#[test]
fn change_password_without_selection_is_rejected() {
    let (mut matcher, store) = loaded_matcher();
    let err = block_on(matcher.change_password(&store, None, &change("opsPass1", "abc123", "abc123")))
        .expect_err("no selection");
    assert_eq!(err, ChangePasswordError::Validation(ValidationError::NoAdminSelected));
    assert!(store.updates().is_empty());
}

#[test]
fn change_password_requires_all_fields() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(
        matcher.validate_change(Some("a1"), &change("opsPass1", "", "abc123")),
        Err(ValidationError::MissingPasswordFields)
    );
}

#[test]
fn change_password_rejects_wrong_current_even_with_valid_new() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(
        matcher.validate_change(Some("a1"), &change("not-it", "abc123", "abc123")),
        Err(ValidationError::CurrentPasswordIncorrect)
    );
    assert_eq!(
        matcher.validate_change(Some("a1"), &change("not-it", "x", "y")),
        Err(ValidationError::CurrentPasswordIncorrect)
    );
}

#[test]
fn change_password_rejects_mismatched_confirmation() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(
        matcher.validate_change(Some("a1"), &change("opsPass1", "abc123", "abc124")),
        Err(ValidationError::PasswordMismatch)
    );
}

#[test]
fn change_password_length_boundary() {
    let (matcher, _) = loaded_matcher();
    assert_eq!(
        matcher.validate_change(Some("a1"), &change("opsPass1", "abc12", "abc12")),
        Err(ValidationError::PasswordTooShort { min: 6 })
    );
    assert_eq!(matcher.validate_change(Some("a1"), &change("opsPass1", "abc123", "abc123")), Ok(()));
}

#[test]
fn change_password_success_updates_memory_and_issues_one_write() {
    let (mut matcher, store) = loaded_matcher();
    block_on(matcher.change_password(&store, Some("a1"), &change("opsPass1", "abc123", "abc123"))).expect("change");

    assert_eq!(matcher.find_by_id("a1").map(|a| a.password.as_str()), Some("abc123"));
    assert_eq!(matcher.find_by_id("a2").map(|a| a.password.as_str()), Some("devPass2"));

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].collection, ADMIN_COLLECTION);
    assert_eq!(updates[0].id, "a1");
    assert_eq!(updates[0].fields.get("password").map(String::as_str), Some("abc123"));

    assert!(matcher.authenticate("ops@example.com", "abc123").is_ok());
    assert!(matcher.authenticate("ops@example.com", "opsPass1").is_err());
}

#[test]
fn change_password_store_failure_keeps_old_password() {
    let (mut matcher, store) = loaded_matcher();
    store.fail_with(StoreError::Status { status: 503, message: "unavailable".to_owned() });

    let err = block_on(matcher.change_password(&store, Some("a2"), &change("devPass2", "abc123", "abc123")))
        .expect_err("store down");

    assert!(matches!(err, ChangePasswordError::Store(_)));
    assert_eq!(matcher.find_by_id("a2").map(|a| a.password.as_str()), Some("devPass2"));
}

#[test]
fn last_write_wins_across_matchers() {
    let store = seeded_store();
    let mut tab_a = CredentialMatcher::new();
    let mut tab_b = CredentialMatcher::new();
    block_on(tab_a.load_admins(&store)).expect("load a");
    block_on(tab_b.load_admins(&store)).expect("load b");

    block_on(tab_a.change_password(&store, Some("a1"), &change("opsPass1", "fromA1", "fromA1"))).expect("a");
    block_on(tab_b.change_password(&store, Some("a1"), &change("opsPass1", "fromB1", "fromB1"))).expect("b");

    let stored = &store.documents(ADMIN_COLLECTION)[0];
    assert_eq!(stored.fields["password"], "fromB1");
}

//! Locally persisted login session.
//!
//! DESIGN
//! ======
//! A session is two storage keys: the JSON-encoded [`SessionRecord`] under
//! [`SESSION_KEY`] and its expiry (ms since epoch, decimal string) under
//! [`EXPIRY_KEY`]. The record is never trusted without its expiry, so
//! [`SessionStore::load`] only yields a value when both keys parse.
//! [`SessionStore::read`] also tells a pair that is absent apart from one
//! that is present but unreadable, so the gate can clear the latter.
//!
//! The token is a presence marker, not a credential. Nothing verifies it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::admin::AdministratorRecord;

/// Storage key holding the JSON-encoded session record.
pub const SESSION_KEY: &str = "adminUser";
/// Storage key holding the session expiry in ms since epoch.
pub const EXPIRY_KEY: &str = "adminTokenExpiry";
/// Session lifetime: 30 days in milliseconds.
pub const SESSION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

const TOKEN_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Proof-of-login written after a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub email: String,
    pub name: String,
    pub role: String,
    pub logged_in: bool,
    /// Creation time in ms since epoch.
    pub login_time: i64,
    pub token: String,
}

impl SessionRecord {
    /// Build a fresh record for `admin` created at `now_ms`.
    #[must_use]
    pub fn for_admin(admin: &AdministratorRecord, now_ms: i64, token: String) -> Self {
        Self {
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role.clone(),
            logged_in: true,
            login_time: now_ms,
            token,
        }
    }
}

/// A session record paired with its expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSession {
    pub record: SessionRecord,
    pub expires_at_ms: i64,
}

impl StoredSession {
    /// Pair `record` with an expiry [`SESSION_TTL_MS`] after its login time.
    #[must_use]
    pub fn starting(record: SessionRecord) -> Self {
        let expires_at_ms = record.login_time.saturating_add(SESSION_TTL_MS);
        Self { record, expires_at_ms }
    }

    /// A session is expired once `now_ms` reaches the expiry.
    #[must_use]
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Generate a presence token: `token_<9 base-36 chars>_<now_ms>`.
pub fn generate_token<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> String {
    let suffix = (0..TOKEN_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect::<String>();
    format!("token_{suffix}_{now_ms}")
}

// =============================================================================
// STORAGE
// =============================================================================

/// Persistent string key/value storage (browser `localStorage` in production).
///
/// Writes are best effort: a failing backend behaves like an empty one.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`KeyValueStorage`] for tests and server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Raw state of the persisted pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredPair {
    /// One or both keys are absent.
    Missing,
    /// Both keys are present but at least one does not parse.
    Unreadable,
    Present(StoredSession),
}

/// Load, save, and clear the persisted session pair.
pub trait SessionStore {
    /// Inspect both keys.
    fn read(&self) -> StoredPair;
    fn save(&self, session: &StoredSession);
    /// Remove both keys.
    fn clear(&self);

    /// Both halves of the pair, or `None` if either is missing or unreadable.
    fn load(&self) -> Option<StoredSession> {
        match self.read() {
            StoredPair::Present(session) => Some(session),
            StoredPair::Missing | StoredPair::Unreadable => None,
        }
    }
}

/// [`SessionStore`] over the two-key layout of any [`KeyValueStorage`].
#[derive(Debug, Default)]
pub struct KvSessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> KvSessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> SessionStore for KvSessionStore<S> {
    fn read(&self) -> StoredPair {
        let raw_record = self.storage.get(SESSION_KEY);
        let raw_expiry = self.storage.get(EXPIRY_KEY);
        let (Some(raw_record), Some(raw_expiry)) = (raw_record, raw_expiry) else {
            return StoredPair::Missing;
        };
        let record = serde_json::from_str::<SessionRecord>(&raw_record).ok();
        let expires_at_ms = raw_expiry.trim().parse::<i64>().ok();
        match (record, expires_at_ms) {
            (Some(record), Some(expires_at_ms)) => {
                StoredPair::Present(StoredSession { record, expires_at_ms })
            }
            _ => StoredPair::Unreadable,
        }
    }

    fn save(&self, session: &StoredSession) {
        let Ok(raw) = serde_json::to_string(&session.record) else {
            return;
        };
        self.storage.set(SESSION_KEY, &raw);
        self.storage.set(EXPIRY_KEY, &session.expires_at_ms.to_string());
    }

    fn clear(&self) {
        self.storage.remove(SESSION_KEY);
        self.storage.remove(EXPIRY_KEY);
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn read(&self) -> StoredPair {
        (**self).read()
    }

    fn save(&self, session: &StoredSession) {
        (**self).save(session);
    }

    fn clear(&self) {
        (**self).clear();
    }
}

//! Client-side admin authentication gate.
//!
//! This crate owns the logic shared by the login and dashboard pages of the
//! `client` crate: the administrator and session data model, the storage and
//! document-store seams, credential matching, password changes, and the
//! session expiry check. It has no browser or server dependencies so every
//! rule can be exercised against in-memory fakes.
//!
//! SECURITY
//! ========
//! Credentials are compared in plain text inside the browser and the session
//! is trusted purely from local storage. [`credentials::CredentialVerifier`]
//! isolates the comparison so a hashed verifier can replace
//! [`credentials::PlainTextVerifier`] without touching the gate logic.

pub mod admin;
pub mod credentials;
pub mod error;
pub mod firestore;
pub mod matcher;
pub mod session;
pub mod session_gate;
pub mod store;

pub use admin::AdministratorRecord;
pub use error::{AuthError, ChangePasswordError, StoreError, ValidationError};
pub use matcher::{AdminRoster, CredentialMatcher, PasswordChange};
pub use session::{KeyValueStorage, KvSessionStore, MemoryStorage, SessionRecord, SessionStore, StoredPair, StoredSession};
pub use session_gate::{GateDecision, SessionStatus};
pub use store::{Document, DocumentStore};

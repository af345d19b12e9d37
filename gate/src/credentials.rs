//! Credential comparison seam.
//!
//! [`PlainTextVerifier`] reproduces the stored data as-is: passwords are kept
//! and compared unhashed, with ordinary (not constant-time) equality. A hashed
//! verifier only needs to implement [`CredentialVerifier`].

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use crate::admin::AdministratorRecord;

pub trait CredentialVerifier {
    /// Whether `password` is the password of `admin`.
    fn password_matches(&self, admin: &AdministratorRecord, password: &str) -> bool;

    /// Whether `admin` is the account for `email` and `password`.
    fn verify(&self, admin: &AdministratorRecord, email: &str, password: &str) -> bool {
        admin.email_matches(email) && self.password_matches(admin, password)
    }
}

/// Exact string comparison against the stored plain-text password.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn password_matches(&self, admin: &AdministratorRecord, password: &str) -> bool {
        admin.password == password
    }
}

//! Administrator credential records as stored in the `adminlogin` collection.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use serde::{Deserialize, Serialize};

use crate::store::Document;

/// One administrator account.
///
/// Records are created out-of-band in the document store and loaded
/// read-only by the login page. The only in-app mutation is a password change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministratorRecord {
    /// Store-assigned document identifier.
    pub id: String,
    /// Login email; compared case-insensitively.
    pub email: String,
    /// Plain-text password as stored.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Display-only role label.
    pub role: String,
}

impl AdministratorRecord {
    /// Build a record from a fetched document. Missing fields become empty strings.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let field = |key: &str| doc.fields.get(key).cloned().unwrap_or_default();
        Self {
            id: doc.id.clone(),
            email: field("email"),
            password: field("password"),
            name: field("name"),
            role: field("role"),
        }
    }

    /// Case-insensitive email comparison.
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

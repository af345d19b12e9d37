//! Credential Matcher: sign-in against the loaded administrator list and
//! password changes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page owns one [`CredentialMatcher`] per mount. The admin list is
//! fetched once; a failed fetch leaves the matcher in [`AdminRoster::Failed`]
//! and every sign-in is rejected until the page is reloaded.
//!
//! Async work is split from state updates ([`fetch_admins`] /
//! [`CredentialMatcher::apply_loaded`], [`write_password`] /
//! [`CredentialMatcher::apply_password_change`]) so reactive callers can run
//! the request without holding the matcher across an await point.
//!
//! TRADE-OFFS
//! ==========
//! Password writes carry no version check. Two tabs changing the same account
//! race and the last write wins.

#[cfg(test)]
#[path = "matcher_test.rs"]
mod matcher_test;

use std::collections::BTreeMap;

use rand::Rng;

use crate::admin::AdministratorRecord;
use crate::credentials::{CredentialVerifier, PlainTextVerifier};
use crate::error::{AuthError, ChangePasswordError, MIN_PASSWORD_LEN, StoreError, ValidationError};
use crate::session::{SessionRecord, SessionStore, StoredSession, generate_token};
use crate::store::{ADMIN_COLLECTION, DocumentStore};

/// Load state of the administrator list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AdminRoster {
    #[default]
    Loading,
    Ready(Vec<AdministratorRecord>),
    Failed(StoreError),
}

/// Transient fields of the change-password form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    /// Check the form against `selected`, in order: selection, required
    /// fields, current password, confirmation, length.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] that applies.
    pub fn validate<V: CredentialVerifier>(
        &self,
        verifier: &V,
        selected: Option<&AdministratorRecord>,
    ) -> Result<(), ValidationError> {
        let admin = selected.ok_or(ValidationError::NoAdminSelected)?;
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(ValidationError::MissingPasswordFields);
        }
        if !verifier.password_matches(admin, &self.current) {
            return Err(ValidationError::CurrentPasswordIncorrect);
        }
        if self.new != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }
        Ok(())
    }
}

/// Fetch every administrator record, in store order.
///
/// # Errors
///
/// Propagates the store failure unchanged.
pub async fn fetch_admins(store: &impl DocumentStore) -> Result<Vec<AdministratorRecord>, StoreError> {
    let docs = store.list_all(ADMIN_COLLECTION).await?;
    Ok(docs.iter().map(AdministratorRecord::from_document).collect())
}

/// Write `new_password` to the administrator document `admin_id`.
///
/// # Errors
///
/// Propagates the store failure unchanged.
pub async fn write_password(store: &impl DocumentStore, admin_id: &str, new_password: &str) -> Result<(), StoreError> {
    let mut fields = BTreeMap::new();
    fields.insert("password".to_owned(), new_password.to_owned());
    store.update_by_id(ADMIN_COLLECTION, admin_id, &fields).await
}

#[derive(Clone, Debug, Default)]
pub struct CredentialMatcher<V = PlainTextVerifier> {
    roster: AdminRoster,
    verifier: V,
}

impl CredentialMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: CredentialVerifier> CredentialMatcher<V> {
    pub fn with_verifier(verifier: V) -> Self {
        Self { roster: AdminRoster::Loading, verifier }
    }

    pub fn roster(&self) -> &AdminRoster {
        &self.roster
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Loaded administrators; empty unless the roster is ready.
    pub fn admins(&self) -> &[AdministratorRecord] {
        match &self.roster {
            AdminRoster::Ready(admins) => admins.as_slice(),
            AdminRoster::Loading | AdminRoster::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.roster, AdminRoster::Loading)
    }

    /// Record the outcome of [`fetch_admins`].
    pub fn apply_loaded(&mut self, result: Result<Vec<AdministratorRecord>, StoreError>) {
        self.roster = match result {
            Ok(admins) => AdminRoster::Ready(admins),
            Err(err) => AdminRoster::Failed(err),
        };
    }

    /// Fetch and record the administrator list.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the roster is left in [`AdminRoster::Failed`].
    pub async fn load_admins(&mut self, store: &impl DocumentStore) -> Result<usize, StoreError> {
        let result = fetch_admins(store).await;
        let outcome = result.as_ref().map(Vec::len).map_err(StoreError::clone);
        self.apply_loaded(result);
        outcome
    }

    /// Find the first administrator matching `email` (any case) and `password` (exact).
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingCredentials`] if either field is empty
    /// - [`AuthError::AdminsUnavailable`] if the list is not loaded
    /// - [`AuthError::InvalidCredentials`] if nothing matches
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&AdministratorRecord, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }
        let AdminRoster::Ready(admins) = &self.roster else {
            return Err(AuthError::AdminsUnavailable);
        };
        admins
            .iter()
            .find(|admin| self.verifier.verify(admin, email, password))
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Authenticate and persist a new session created at `now_ms`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::authenticate`]; nothing is written on failure.
    pub fn sign_in<R: Rng + ?Sized>(
        &self,
        sessions: &impl SessionStore,
        email: &str,
        password: &str,
        now_ms: i64,
        rng: &mut R,
    ) -> Result<StoredSession, AuthError> {
        let admin = self.authenticate(email, password)?;
        let record = SessionRecord::for_admin(admin, now_ms, generate_token(rng, now_ms));
        let session = StoredSession::starting(record);
        sessions.save(&session);
        Ok(session)
    }

    /// Account targeted by "change password": the admin whose email matches
    /// `typed_email`, otherwise the first loaded admin.
    pub fn select_for_change(&self, typed_email: &str) -> Option<&AdministratorRecord> {
        let admins = self.admins();
        admins
            .iter()
            .find(|admin| !typed_email.is_empty() && admin.email_matches(typed_email))
            .or_else(|| admins.first())
    }

    pub fn find_by_id(&self, admin_id: &str) -> Option<&AdministratorRecord> {
        self.admins().iter().find(|admin| admin.id == admin_id)
    }

    /// Validate `form` against the admin `admin_id` refers to.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] that applies.
    pub fn validate_change(&self, admin_id: Option<&str>, form: &PasswordChange) -> Result<(), ValidationError> {
        let selected = admin_id.and_then(|id| self.find_by_id(id));
        form.validate(&self.verifier, selected)
    }

    /// Mirror a successful store write in the in-memory list.
    pub fn apply_password_change(&mut self, admin_id: &str, new_password: &str) {
        if let AdminRoster::Ready(admins) = &mut self.roster {
            for admin in admins.iter_mut().filter(|admin| admin.id == admin_id) {
                admin.password = new_password.to_owned();
            }
        }
    }

    /// Validate, write the new password to the store, then update the list.
    ///
    /// # Errors
    ///
    /// Validation failures never reach the store. A store failure leaves the
    /// in-memory list unchanged.
    pub async fn change_password(
        &mut self,
        store: &impl DocumentStore,
        admin_id: Option<&str>,
        form: &PasswordChange,
    ) -> Result<(), ChangePasswordError> {
        self.validate_change(admin_id, form)?;
        let id = admin_id.ok_or(ValidationError::NoAdminSelected)?;
        write_password(store, id, &form.new).await?;
        self.apply_password_change(id, &form.new);
        Ok(())
    }
}

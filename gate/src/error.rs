//! Error types for authentication, password changes, and store access.
//!
//! ERROR HANDLING
//! ==============
//! Every error here is recoverable. Pages convert them into a notice or a
//! silent redirect; none of them aborts hydration.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Minimum accepted length for a new password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Form-level input problems. Raised before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("No admin selected for password change")]
    NoAdminSelected,
    #[error("Please fill all password fields")]
    MissingPasswordFields,
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("Password should be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

/// Failure talking to the remote document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("store request failed: {0}")]
    Transport(String),
    /// The store answered with a non-success HTTP status.
    #[error("store responded with {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected document shape.
    #[error("malformed store response: {0}")]
    Decode(String),
    /// Connection settings could not be obtained.
    #[error("store configuration unavailable: {0}")]
    Config(String),
}

/// Sign-in failure.
///
/// [`AuthError::InvalidCredentials`] deliberately does not say whether the
/// email or the password was wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The administrator list never loaded, so nothing can match.
    #[error("Failed to load admin configuration")]
    AdminsUnavailable,
}

/// Password change failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangePasswordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to change password. Please try again.")]
    Store(#[from] StoreError),
}

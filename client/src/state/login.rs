//! Login page state machine.
//!
//! DESIGN
//! ======
//! The page is the product of two small machines:
//! - admin list: `Loading → Ready | Failed` (held by the `CredentialMatcher`)
//! - form mode: `SignIn ⇄ ChangePassword`
//!
//! Every handler on the page is a method here so the transitions can be
//! tested without a browser. The view only reads fields and forwards events.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use gate::error::{AuthError, ChangePasswordError, StoreError, ValidationError};
use gate::matcher::{CredentialMatcher, PasswordChange};
use gate::session::{SessionStore, StoredSession};
use gate::AdministratorRecord;
use rand::Rng;

/// Whether a password input shows its contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Masked,
    Revealed,
}

impl Visibility {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Revealed,
            Self::Revealed => Self::Masked,
        }
    }

    /// Value for the input's `type` attribute.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Revealed => "text",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Masked => "Show",
            Self::Revealed => "Hide",
        }
    }
}

/// Password inputs with their own visibility toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordField {
    Login,
    Current,
    New,
    Confirm,
}

/// Which form the login card shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    SignIn,
    /// `admin_id` is `None` when no administrator could be selected.
    ChangePassword { admin_id: Option<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// BEM modifier used by the notice banner.
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Latest user-facing feedback message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

fn validation_level(err: &ValidationError) -> NoticeLevel {
    match err {
        ValidationError::MissingCredentials
        | ValidationError::MissingPasswordFields
        | ValidationError::PasswordTooShort { .. } => NoticeLevel::Warning,
        ValidationError::NoAdminSelected
        | ValidationError::CurrentPasswordIncorrect
        | ValidationError::PasswordMismatch => NoticeLevel::Error,
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoginState {
    pub matcher: CredentialMatcher,
    pub mode: FormMode,
    pub email: String,
    pub password: String,
    pub change: PasswordChange,
    login_visibility: Visibility,
    current_visibility: Visibility,
    new_visibility: Visibility,
    confirm_visibility: Visibility,
    /// A password write is in flight.
    pub busy: bool,
    /// Inline error under the sign-in form.
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl LoginState {
    /// Sign-in is blocked while admins load or a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.matcher.is_loading()
    }

    pub fn is_changing_password(&self) -> bool {
        matches!(self.mode, FormMode::ChangePassword { .. })
    }

    pub fn visibility(&self, field: PasswordField) -> Visibility {
        match field {
            PasswordField::Login => self.login_visibility,
            PasswordField::Current => self.current_visibility,
            PasswordField::New => self.new_visibility,
            PasswordField::Confirm => self.confirm_visibility,
        }
    }

    pub fn toggle_visibility(&mut self, field: PasswordField) {
        let slot = match field {
            PasswordField::Login => &mut self.login_visibility,
            PasswordField::Current => &mut self.current_visibility,
            PasswordField::New => &mut self.new_visibility,
            PasswordField::Confirm => &mut self.confirm_visibility,
        };
        *slot = slot.toggled();
    }

    /// Current text of a password input.
    pub fn field_value(&self, field: PasswordField) -> &str {
        match field {
            PasswordField::Login => &self.password,
            PasswordField::Current => &self.change.current,
            PasswordField::New => &self.change.new,
            PasswordField::Confirm => &self.change.confirm,
        }
    }

    pub fn set_field_value(&mut self, field: PasswordField, value: String) {
        match field {
            PasswordField::Login => self.password = value,
            PasswordField::Current => self.change.current = value,
            PasswordField::New => self.change.new = value,
            PasswordField::Confirm => self.change.confirm = value,
        }
    }

    /// Record the admin list fetch result.
    pub fn admins_loaded(&mut self, result: Result<Vec<AdministratorRecord>, StoreError>) {
        match &result {
            Ok(_) => {
                self.notice = Some(Notice::new(NoticeLevel::Success, "Admin users loaded successfully"));
            }
            Err(_) => {
                self.error = Some(AuthError::AdminsUnavailable.to_string());
                self.notice = Some(Notice::new(NoticeLevel::Error, "Failed to load admin users"));
            }
        }
        self.matcher.apply_loaded(result);
    }

    /// Match the typed credentials and persist a session on success.
    pub fn sign_in<R: Rng + ?Sized>(
        &mut self,
        sessions: &impl SessionStore,
        now_ms: i64,
        rng: &mut R,
    ) -> Option<StoredSession> {
        self.error = None;
        match self.matcher.sign_in(sessions, &self.email, &self.password, now_ms, rng) {
            Ok(session) => {
                let welcome = format!("Welcome back, {}!", session.record.name);
                self.notice = Some(Notice::new(NoticeLevel::Success, welcome));
                Some(session)
            }
            Err(err) => {
                let level = match &err {
                    AuthError::Validation(v) => validation_level(v),
                    AuthError::InvalidCredentials | AuthError::AdminsUnavailable => NoticeLevel::Error,
                };
                self.error = Some(err.to_string());
                self.notice = Some(Notice::new(level, err.to_string()));
                None
            }
        }
    }

    /// Administrator the change-password form targets, if any.
    pub fn selected_admin(&self) -> Option<&AdministratorRecord> {
        match &self.mode {
            FormMode::ChangePassword { admin_id: Some(id) } => self.matcher.find_by_id(id),
            FormMode::ChangePassword { admin_id: None } | FormMode::SignIn => None,
        }
    }

    /// Switch to the change-password form for the account matching the typed
    /// email, or the first administrator.
    pub fn open_change_password(&mut self) {
        let admin_id = self.matcher.select_for_change(&self.email).map(|a| a.id.clone());
        self.mode = FormMode::ChangePassword { admin_id };
        self.reset_change_fields();
    }

    pub fn cancel_change_password(&mut self) {
        self.mode = FormMode::SignIn;
        self.reset_change_fields();
        self.notice = Some(Notice::new(NoticeLevel::Info, "Password change cancelled"));
    }

    /// Validate the change-password form. On success marks the page busy and
    /// returns `(admin_id, new_password)` for the store write.
    pub fn begin_password_change(&mut self) -> Option<(String, String)> {
        let FormMode::ChangePassword { admin_id } = &self.mode else {
            return None;
        };
        if self.busy {
            return None;
        }
        let admin_id = admin_id.clone();
        match self.matcher.validate_change(admin_id.as_deref(), &self.change) {
            Ok(()) => {
                let id = admin_id?;
                self.busy = true;
                Some((id, self.change.new.clone()))
            }
            Err(err) => {
                self.notice = Some(Notice::new(validation_level(&err), err.to_string()));
                None
            }
        }
    }

    /// Apply the store write result started by [`Self::begin_password_change`].
    pub fn finish_password_change(&mut self, admin_id: &str, new_password: &str, result: Result<(), StoreError>) {
        self.busy = false;
        match result {
            Ok(()) => {
                self.matcher.apply_password_change(admin_id, new_password);
                self.mode = FormMode::SignIn;
                self.reset_change_fields();
                self.notice = Some(Notice::new(NoticeLevel::Success, "Password changed successfully!"));
            }
            Err(err) => {
                let text = ChangePasswordError::from(err).to_string();
                self.notice = Some(Notice::new(NoticeLevel::Error, text));
            }
        }
    }

    fn reset_change_fields(&mut self) {
        self.change = PasswordChange::default();
        self.current_visibility = Visibility::Masked;
        self.new_visibility = Visibility::Masked;
        self.confirm_visibility = Visibility::Masked;
    }
}

use std::fmt;

use secrecy::ExposeSecret;
use secrecy::Secret;

use crate::admin::errors::NewPasswordError;
use crate::admin::errors::ResetRequestError;
use crate::admin::errors::UserIdError;

/// Role name that grants access to administrative operations.
pub const ADMIN_ROLE: &str = "admin";

/// User identifier as issued by the identity provider.
///
/// Opaque to this service: only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from a raw string.
    ///
    /// # Errors
    /// * `Empty` - String is empty or whitespace only
    pub fn new(id: String) -> Result<Self, UserIdError> {
        if id.trim().is_empty() {
            Err(UserIdError::Empty)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authenticated caller resolved from a bearer token.
///
/// Lives for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: UserId,
    pub email: Option<String>,
    /// Raw user record returned by the identity provider.
    pub profile: serde_json::Value,
}

/// Replacement password for a user.
///
/// Strength rules belong to the identity provider; only emptiness is checked here.
#[derive(Clone)]
pub struct NewPassword(Secret<String>);

impl NewPassword {
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: Secret<String>) -> Result<Self, NewPasswordError> {
        if password.expose_secret().is_empty() {
            Err(NewPasswordError::Empty)
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword([REDACTED])")
    }
}

/// Command to overwrite a user's password
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub user_id: UserId,
    pub new_password: NewPassword,
}

impl ResetPasswordCommand {
    pub fn new(user_id: UserId, new_password: NewPassword) -> Self {
        Self {
            user_id,
            new_password,
        }
    }

    /// Build a command from optional raw fields.
    ///
    /// Absent and empty values are both reported as missing.
    ///
    /// # Errors
    /// * `MissingField` - `user_id` or `new_password` absent or empty
    pub fn from_raw(
        user_id: Option<String>,
        new_password: Option<Secret<String>>,
    ) -> Result<Self, ResetRequestError> {
        let user_id = user_id.ok_or(ResetRequestError::MissingField("user_id"))?;
        let new_password = new_password.ok_or(ResetRequestError::MissingField("new_password"))?;

        let user_id = UserId::new(user_id).map_err(|_| ResetRequestError::MissingField("user_id"))?;
        let new_password = NewPassword::new(new_password)
            .map_err(|_| ResetRequestError::MissingField("new_password"))?;

        Ok(Self::new(user_id, new_password))
    }
}

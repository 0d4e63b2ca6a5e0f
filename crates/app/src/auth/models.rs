//! Auth data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiffin::profile::UserProfile;
use zeroize::Zeroize;

use crate::auth::SessionToken;

/// Email and password submitted to login and register.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,

    /// Plain password, wiped on drop.
    pub password: String,
}

impl Credentials {
    /// Bundle an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Reasons a password change is refused before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("passwords must be at least {MIN_PASSWORD_CHARS} characters")]
    TooShort,

    #[error("New password must be different from old password")]
    Unchanged,
}

/// Body of `PUT /user/update-password`.
#[derive(Clone, Serialize)]
pub struct PasswordChange {
    current_password: String,
    new_password: String,
}

impl PasswordChange {
    /// Validate a password change.
    ///
    /// # Errors
    ///
    /// Returns a [`PasswordError`] for a short or unchanged password.
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Result<Self, PasswordError> {
        let change = Self {
            current_password: current.into(),
            new_password: new.into(),
        };

        if change.current_password.chars().count() < MIN_PASSWORD_CHARS
            || change.new_password.chars().count() < MIN_PASSWORD_CHARS
        {
            return Err(PasswordError::TooShort);
        }

        if change.current_password == change.new_password {
            return Err(PasswordError::Unchanged);
        }

        Ok(change)
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange(**redacted**)")
    }
}

impl Drop for PasswordChange {
    fn drop(&mut self) {
        self.current_password.zeroize();
        self.new_password.zeroize();
    }
}

/// Successful login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
}

/// Register response; some deployments log the new account straight in.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// What happened after registering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The backend issued a token; the customer is signed in.
    SignedIn(SessionToken),

    /// The account exists; the customer must log in next.
    Created(String),
}

impl From<RegisterResponse> for RegisterOutcome {
    fn from(response: RegisterResponse) -> Self {
        match response.access_token.filter(|token| !token.is_empty()) {
            Some(token) => Self::SignedIn(SessionToken::new(token)),
            None => Self::Created(
                response
                    .message
                    .unwrap_or_else(|| "Account created. Please log in.".to_string()),
            ),
        }
    }
}

/// Profile as held by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    /// The profile fetch is outstanding.
    Loading,

    /// Profile available.
    Loaded(UserProfile),

    /// The fetch failed for a reason other than an expired session.
    Unavailable(String),
}

//! Registration and login inputs.
//!
//! Handlers build these from raw strings before calling the account service,
//! so format problems surface as validation errors rather than lookups.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{Credential, UserValidationError, Username};

/// Domain error returned when login payload values are blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials presented at login.
///
/// Login only checks presence. Format rules belong to registration, so a
/// malformed username simply fails verification.
///
/// # Examples
/// ```
/// use review_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "lovelace").expect("credentials");
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Trim the username and reject empty fields. Formats are not checked.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A validated account registration.
///
/// # Examples
/// ```
/// use review_backend::domain::Registration;
///
/// let registration = Registration::try_from_parts("ada", "lovelace").expect("valid");
/// assert_eq!(registration.username().as_ref(), "ada");
/// assert!(Registration::try_from_parts("1ada", "lovelace").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    credential: Credential,
}

impl Registration {
    /// Validate the username and password formats.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            credential: Credential::from_password(password)?,
        })
    }

    /// Validated username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Split into the username and credential for a new [`User`](crate::domain::User).
    pub fn into_parts(self) -> (Username, Credential) {
        (self.username, self.credential)
    }
}

//! Per-user notification entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Notification::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationValidationError {
    EmptyMessage,
    EmptyLink,
}

impl fmt::Display for NotificationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "notification message must not be empty"),
            Self::EmptyLink => write!(f, "notification link must not be blank when present"),
        }
    }
}

impl std::error::Error for NotificationValidationError {}

/// A message delivered to one user.
///
/// Notifications are appended in arrival order and never reordered.
///
/// ## Invariants
/// - `message` is not blank.
/// - `link`, when present, is not blank.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use review_backend::domain::Notification;
///
/// let note = Notification::new("Your snippet was reviewed", Some("/snippets/7".into()), Utc::now())
///     .expect("valid notification");
/// assert_eq!(note.message(), "Your snippet was reviewed");
/// assert_eq!(note.link(), Some("/snippets/7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NotificationDto", into = "NotificationDto")]
pub struct Notification {
    message: String,
    link: Option<String>,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a notification, rejecting a blank message or a blank link.
    pub fn new(
        message: impl Into<String>,
        link: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NotificationValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(NotificationValidationError::EmptyMessage);
        }
        if link.as_deref().is_some_and(|link| link.trim().is_empty()) {
            return Err(NotificationValidationError::EmptyLink);
        }
        Ok(Self {
            message,
            link,
            created_at,
        })
    }

    /// Notification text.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Optional reference to the snippet or review concerned.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// When the notification was pushed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationDto {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(value: Notification) -> Self {
        Self {
            message: value.message,
            link: value.link,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<NotificationDto> for Notification {
    type Error = NotificationValidationError;

    fn try_from(value: NotificationDto) -> Result<Self, Self::Error> {
        Notification::new(value.message, value.link, value.created_at)
    }
}

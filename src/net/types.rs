//! JSON schema of the auth endpoints and the session outcome type.
//!
//! DESIGN
//! ======
//! `SessionEnvelope` mirrors what the backend actually sends, including the
//! bare `{detail}` bodies the backend produces for dependency errors, so every
//! field is optional or defaulted. Controllers only ever see the folded
//! [`SessionResult`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Deserialize;

/// Read-only identity projection returned by `/auth/me`.
///
/// Login and register responses carry only `id`, `email`, `username` and
/// `full_name`; the remaining fields default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    /// ISO-8601 account creation timestamp.
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Full name if set, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Response body of every auth endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionEnvelope {
    pub success: bool,
    pub message: Option<String>,
    /// String for `HTTPException`, list for validation errors.
    pub detail: Option<serde_json::Value>,
    pub user: Option<UserProfile>,
}

impl SessionEnvelope {
    /// Human-readable failure text: `message`, else a string `detail`.
    pub fn failure_text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.detail.as_ref().and_then(serde_json::Value::as_str))
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Outcome of a session operation, owned by whichever controller asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionResult {
    Ok { user: Option<UserProfile>, message: Option<String> },
    Failed { message: String },
}

impl SessionResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Ok { user, .. } => user.as_ref(),
            Self::Failed { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { message, .. } => message.as_deref(),
            Self::Failed { message } => Some(message),
        }
    }
}

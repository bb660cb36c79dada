//! Login request/response entities.
//!
//! The engine's [`covenant_contract::Credentials`] covers the happy path;
//! [`LoginRequest`] exists for the invalid-credential matrix, where a
//! field may be deliberately absent from the payload.

use serde::{Deserialize, Serialize};

/// A login payload where either field may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    /// The username, omitted from the payload when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// The password, omitted from the payload when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// A payload with both fields present.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    /// A payload with no username field at all.
    pub fn without_username(password: &str) -> Self {
        Self {
            username: None,
            password: Some(password.to_string()),
        }
    }

    /// A payload with no password field at all.
    pub fn without_password(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: None,
        }
    }
}

/// The 401 body for rejected credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginFailure {
    /// The rejection message.
    pub message: String,
}

//! Authentication sessions.
//!
//! A [`Credentials`] pair is exchanged at a login endpoint for a
//! [`Session`] holding an opaque bearer token and its server-side
//! lifetime. The engine never enforces the lifetime itself; `timeout` is
//! informational and expiry happens on the server.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::{ContractError, ContractResult};
use crate::request::RequestBuilder;

/// A username/password pair for the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// The account username.
    pub username: String,
    /// The account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// An issued session: opaque bearer token plus its lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    /// The opaque token, carried as `Authorization: Bearer` afterwards.
    pub token: String,
    /// Token lifetime in milliseconds, enforced server-side.
    pub timeout: u64,
}

impl Session {
    /// The `Authorization` header value for this session.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Exchanges credentials for a session at the given login endpoint.
///
/// Anything but a 200 with a well-formed token payload is an assertion
/// failure carrying the status and body, so a scenario that needs a
/// session as a precondition fails with a usable message rather than a
/// mysterious 401 later.
pub fn login(
    client: &ApiClient,
    base_url: &str,
    endpoint: &Endpoint,
    credentials: &Credentials,
) -> ContractResult<Session> {
    let spec = RequestBuilder::new(endpoint.clone())
        .json_body(credentials)
        .build(base_url)?;
    let response = client.execute(spec)?;

    if response.status.as_u16() != 200 {
        return Err(ContractError::assertion(format!(
            "login as '{}' failed: status {}, body {}",
            credentials.username,
            response.status.as_u16(),
            response.text
        )));
    }

    let session: Session = response.json_as()?;
    if session.token.is_empty() {
        return Err(ContractError::assertion("login returned an empty token"));
    }
    debug!(username = %credentials.username, timeout = session.timeout, "Session issued");
    Ok(session)
}

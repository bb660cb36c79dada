//! Request construction.
//!
//! [`RequestBuilder`] assembles a fully-resolved [`RequestSpec`] from an
//! endpoint plus the per-call path parameters, query parameters, headers,
//! and body. Construction is pure: nothing touches the network until the
//! spec is handed to a client.
//!
//! All validation happens in [`RequestBuilder::build`], so the fluent
//! methods never fail mid-chain. Any problem — an unresolved `{placeholder}`,
//! an unknown path parameter, an invalid header — is a
//! [`ContractError::Construction`] and aborts the scenario before any
//! network call.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{ContractError, ContractResult};

/// A fully-resolved request, built per call and consumed once.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: Method,
    /// The resolved URL, query string included.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional JSON body.
    pub body: Option<Value>,
}

/// Builder for a [`RequestSpec`].
///
/// # Example
///
/// ```rust
/// use covenant_contract::{Endpoint, RequestBuilder};
/// use http::Method;
///
/// const COUNTRY_BY_CODE: Endpoint = Endpoint::new(Method::GET, "/api/v1/countries/{code}");
///
/// let spec = RequestBuilder::new(COUNTRY_BY_CODE)
///     .path_param("code", "VN")
///     .build("http://localhost:3000")
///     .unwrap();
/// assert_eq!(spec.url.path(), "/api/v1/countries/VN");
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: Endpoint,
    path_params: Vec<(String, String)>,
    query_params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Result<Value, String>>,
}

impl RequestBuilder {
    /// Starts a builder for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            path_params: Vec::new(),
            query_params: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Supplies a value for a `{name}` placeholder in the path template.
    pub fn path_param(mut self, name: &str, value: impl ToString) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter. The value is percent-encoded on build.
    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.query_params.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter only when a value is present.
    ///
    /// `None` adds no key at all; an absent optional parameter is not the
    /// same request as one carrying an empty string.
    pub fn query_param_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query_param(name, v),
            None => self,
        }
    }

    /// Adds a request header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds an `Authorization: Bearer` header for the given token.
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Sets a JSON body from any serializable value.
    ///
    /// Serialization problems surface from [`RequestBuilder::build`].
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    /// Sets a raw JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(Ok(body));
        self
    }

    /// Resolves the builder against a base URL, validating everything.
    pub fn build(self, base_url: &str) -> ContractResult<RequestSpec> {
        let path = resolve_path(self.endpoint.path, &self.path_params)?;

        let base = Url::parse(base_url).map_err(|e| {
            ContractError::construction(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        let mut url = if path.is_empty() {
            base
        } else {
            base.join(&path).map_err(|e| {
                ContractError::construction(format!("cannot resolve path '{}': {}", path, e))
            })?
        };

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query_params {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str()).map_err(|_| {
                ContractError::construction(format!("invalid header name '{}'", name))
            })?;
            let value = HeaderValue::try_from(value.as_str()).map_err(|_| {
                ContractError::construction(format!("invalid value for header '{}'", name))
            })?;
            headers.append(name, value);
        }

        let body = match self.body {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(message)) => {
                return Err(ContractError::construction(format!(
                    "body serialization failed: {}",
                    message
                )));
            }
        };

        Ok(RequestSpec {
            method: self.endpoint.method,
            url,
            headers,
            body,
        })
    }
}

/// Substitutes path parameters into the template.
///
/// Every supplied parameter must correspond to a `{name}` placeholder, and
/// every placeholder must end up resolved.
fn resolve_path(template: &str, params: &[(String, String)]) -> ContractResult<String> {
    let mut path = template.to_string();

    for (name, value) in params {
        if value.contains(['/', '?', '#']) {
            return Err(ContractError::construction(format!(
                "path parameter '{}' contains reserved characters: '{}'",
                name, value
            )));
        }
        let placeholder = format!("{{{}}}", name);
        if !path.contains(&placeholder) {
            return Err(ContractError::construction(format!(
                "unknown path parameter '{}' for template '{}'",
                name, template
            )));
        }
        path = path.replace(&placeholder, value);
    }

    if let Some(open) = path.find('{') {
        let end = path[open..].find('}').map_or(path.len(), |i| open + i + 1);
        return Err(ContractError::construction(format!(
            "unresolved path parameter {} in template '{}'",
            &path[open..end],
            template
        )));
    }

    Ok(path)
}

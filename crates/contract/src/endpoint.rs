//! Endpoint definitions.
//!
//! An [`Endpoint`] pairs an HTTP method with a path template. Endpoints are
//! immutable and meant to be declared once, at startup, in a fixture
//! catalog:
//!
//! ```rust
//! use covenant_contract::Endpoint;
//! use http::Method;
//!
//! const COUNTRY_BY_CODE: Endpoint = Endpoint::new(Method::GET, "/api/v1/countries/{code}");
//! ```
//!
//! Path templates use `{name}` placeholders, resolved per call by the
//! request builder.

use http::Method;

/// An HTTP endpoint: method plus path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The HTTP method.
    pub method: Method,
    /// The path template, with `{name}` placeholders for path parameters.
    ///
    /// An empty template means "the base URL itself", used for endpoints
    /// whose full address comes from configuration (e.g. GraphQL).
    pub path: &'static str,
}

impl Endpoint {
    /// Creates an endpoint.
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

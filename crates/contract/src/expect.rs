//! Response expectations.
//!
//! A [`ResponseExpectation`] declares what a response must look like:
//! status code, exact header values, a named schema, a body the response
//! must structurally equal, and per-element predicates. Each check is
//! independently toggleable; the verifier applies whichever are set.

use serde_json::Value;

use crate::predicate::FilterPredicate;

/// Declarative expectations for a single response.
///
/// # Example
///
/// ```rust
/// use covenant_contract::ResponseExpectation;
/// use serde_json::json;
///
/// let expectation = ResponseExpectation::new()
///     .status(200)
///     .header("X-Powered-By", "Express")
///     .header("Content-Type", "application/json; charset=utf-8")
///     .body_equals(json!({"name": "Vietnam", "code": "VN"}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseExpectation {
    pub(crate) status: Option<u16>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) schema: Option<String>,
    pub(crate) body: Option<Value>,
    pub(crate) predicates: Vec<FilterPredicate>,
}

impl ResponseExpectation {
    /// Starts an empty expectation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects an exact status code.
    pub fn status(mut self, code: u16) -> Self {
        self.status = Some(code);
        self
    }

    /// Expects a header with an exact value.
    ///
    /// Header names are looked up case-insensitively; values must match
    /// exactly. A missing header and a wrong value are reported as
    /// distinct failures.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Expects the body to validate against a named schema.
    pub fn schema(mut self, name: &str) -> Self {
        self.schema = Some(name.to_string());
        self
    }

    /// Expects the body to structurally equal the given value.
    ///
    /// Object key order never matters; arrays compare as multisets, so
    /// element order does not matter but element counts do.
    pub fn body_equals(mut self, expected: Value) -> Self {
        self.body = Some(expected);
        self
    }

    /// Expects every element of an array body to satisfy the predicate.
    pub fn each_satisfies(mut self, predicate: FilterPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

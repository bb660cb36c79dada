//! GraphQL request envelope.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// A GraphQL request: query document plus variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    /// The query document.
    pub query: String,
    /// The query variables.
    pub variables: HashMap<String, Value>,
}

impl GraphQlRequest {
    /// Creates a request with no variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: HashMap::new(),
        }
    }

    /// Adds a variable.
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }
}

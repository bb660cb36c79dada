//! Country entities.

use serde::{Deserialize, Serialize};

/// A country as the service returns it.
///
/// The v1 endpoints return name and code only; the v3 filter endpoint
/// adds `gdp`. The optional field serializes only when present, so a
/// v1-shaped `Country` compares equal to a v1 response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// The country's display name.
    pub name: String,
    /// The ISO 3166-1 alpha-2 code.
    pub code: String,
    /// GDP in billions, returned by the filter endpoint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdp: Option<f64>,
}

impl Country {
    /// A country without GDP, as the v1 endpoints return it.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            gdp: None,
        }
    }

    /// A country with GDP, as the filter endpoint returns it.
    pub fn with_gdp(name: impl Into<String>, code: impl Into<String>, gdp: f64) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            gdp: Some(gdp),
        }
    }

    /// The same country without its GDP field.
    pub fn without_gdp(&self) -> Self {
        Self::new(self.name.clone(), self.code.clone())
    }
}

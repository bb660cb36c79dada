//! Static fixtures: endpoints, headers, credentials, reference data.
//!
//! Everything here is known in advance of any request. Endpoints are
//! declared once as constants; scenarios resolve them per call through the
//! engine's request builder.

use covenant_contract::{Credentials, Endpoint};
use http::Method;
use uuid::Uuid;

use crate::models::country::Country;

// =============================================================================
// Endpoint catalog
// =============================================================================

/// `GET /api/v1/countries` - the full country list.
pub const GET_COUNTRIES: Endpoint = Endpoint::new(Method::GET, "/api/v1/countries");

/// `GET /api/v1/countries/{code}` - one country by ISO code.
pub const GET_COUNTRY: Endpoint = Endpoint::new(Method::GET, "/api/v1/countries/{code}");

/// `GET /api/v3/countries?gdp=&operator=` - countries filtered by GDP.
pub const GET_COUNTRIES_FILTERED: Endpoint = Endpoint::new(Method::GET, "/api/v3/countries");

/// `GET /api/v4/countries?page=&size=` - the paged country list.
pub const GET_COUNTRIES_PAGED: Endpoint = Endpoint::new(Method::GET, "/api/v4/countries");

/// `GET /api/v5/countries` - the country list behind an `api-key` header.
pub const GET_COUNTRIES_KEYED: Endpoint = Endpoint::new(Method::GET, "/api/v5/countries");

/// `POST /api/login` - exchanges credentials for a bearer token.
pub const LOGIN: Endpoint = Endpoint::new(Method::POST, "/api/login");

/// `POST /api/user` - creates a customer (bearer required).
pub const CREATE_USER: Endpoint = Endpoint::new(Method::POST, "/api/user");

/// `GET /api/user/{userId}` - reads a customer (bearer required).
pub const GET_USER: Endpoint = Endpoint::new(Method::GET, "/api/user/{userId}");

/// `DELETE /api/user/{userId}` - deletes a customer (bearer required).
pub const DELETE_USER: Endpoint = Endpoint::new(Method::DELETE, "/api/user/{userId}");

/// `POST /api/card` - issues a card for a customer (bearer required).
pub const CREATE_CARD: Endpoint = Endpoint::new(Method::POST, "/api/card");

/// The GraphQL endpoint. The full address comes from configuration
/// (`TargetConfig::graphql_url`), so the path template is empty.
pub const GRAPHQL: Endpoint = Endpoint::new(Method::POST, "");

// =============================================================================
// Expected headers
// =============================================================================

/// The server framework header every JSON response must carry.
pub const X_POWERED_BY: (&str, &str) = ("X-Powered-By", "Express");

/// The content type every JSON response must carry.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json; charset=utf-8");

/// The name of the api-key request header guarding `/api/v5/countries`.
pub const API_KEY_HEADER: &str = "api-key";

/// The api-key value the service accepts.
pub const API_KEY_VALUE: &str = "private";

// =============================================================================
// Credentials and identities
// =============================================================================

/// The one valid staff account.
pub fn staff_credentials() -> Credentials {
    Credentials::new("staff", "1234567890")
}

/// The session lifetime the login endpoint promises, in milliseconds.
pub const SESSION_TIMEOUT_MS: u64 = 120_000;

/// A unique email for a scenario-created user.
///
/// Scenarios may run concurrently against a shared deployment, so each
/// created user gets its own identity.
pub fn unique_email() -> String {
    format!("auto_api_{}@abc.com", Uuid::new_v4())
}

// =============================================================================
// Reference data
// =============================================================================

/// The country dataset the service is seeded with.
///
/// Ten entries, so paginating with size 4 yields two full pages and a
/// two-element last page. Japan sits exactly on the 5000 GDP threshold
/// the filter scenarios use.
pub fn country_dataset() -> Vec<Country> {
    vec![
        Country::with_gdp("Vietnam", "VN", 223.0),
        Country::with_gdp("United States", "US", 21400.0),
        Country::with_gdp("China", "CN", 14340.0),
        Country::with_gdp("Japan", "JP", 5000.0),
        Country::with_gdp("Germany", "DE", 3846.0),
        Country::with_gdp("India", "IN", 2875.0),
        Country::with_gdp("United Kingdom", "GB", 2829.0),
        Country::with_gdp("France", "FR", 2716.0),
        Country::with_gdp("Brazil", "BR", 1840.0),
        Country::with_gdp("Australia", "AU", 1393.0),
    ]
}

/// The GraphQL query the country scenario sends.
pub const COUNTRY_QUERY: &str = "query ($code: ID!) { country(code: $code) { name code } }";

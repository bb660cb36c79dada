//! # covenant-contract - HTTP Contract Verification Engine
//!
//! This crate is the reusable core of an API acceptance-test suite: it
//! builds parameterized HTTP/GraphQL requests, sends them with a blocking
//! client, and verifies the responses against declarative expectations.
//! The suite crates supply fixtures, typed entities, and the scenarios;
//! this crate supplies the machinery they share.
//!
//! ## Features
//!
//! - **Request construction**: path-template substitution, percent-encoded
//!   query parameters, header maps, JSON bodies; every problem is caught
//!   before any network call
//! - **Response verification**: status, exact header values, named
//!   JSON-schema conformance, structural body equality with multiset array
//!   semantics, and numeric per-element predicates, with every failed
//!   check reported in one aggregate error
//! - **Pagination traversal**: page/size/total echo checks, the
//!   last-page division rule, and cross-page disjointness
//! - **Reconciliation**: field-for-field comparison of an API view
//!   against a backing store behind a narrow fetch-by-id seam, with
//!   ignore paths for server-generated fields and time-window checks for
//!   server-assigned timestamps
//! - **Scoped cleanup**: scenario contexts that guarantee teardown of
//!   created entities on every exit path, logging (never propagating)
//!   cleanup failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covenant_contract::{
//!     ApiClient, Endpoint, RequestBuilder, ResponseExpectation, TargetConfig, Verifier,
//! };
//! use http::Method;
//! use serde_json::json;
//!
//! const COUNTRY_BY_CODE: Endpoint = Endpoint::new(Method::GET, "/api/v1/countries/{code}");
//!
//! fn main() -> covenant_contract::ContractResult<()> {
//!     let config = TargetConfig::from_env();
//!     let client = ApiClient::new(&config)?;
//!
//!     let spec = RequestBuilder::new(COUNTRY_BY_CODE)
//!         .path_param("code", "VN")
//!         .build(&config.base_url)?;
//!     let response = client.execute(spec)?;
//!
//!     let expectation = ResponseExpectation::new()
//!         .status(200)
//!         .header("Content-Type", "application/json; charset=utf-8")
//!         .body_equals(json!({"name": "Vietnam", "code": "VN"}));
//!     Verifier::new().verify(&response, &expectation)
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`ContractResult`]. The taxonomy
//! separates unmet expectations from engine problems:
//!
//! | Variant | Meaning | Effect |
//! |---------|---------|--------|
//! | `Assertion` | one or more expectations unmet | aborts the scenario |
//! | `Construction` | malformed request, caught pre-network | aborts the scenario |
//! | `Transport` | network failure, never retried | aborts the scenario |
//! | `Schema` | registry problem (unknown name, bad document) | aborts the scenario |
//! | `Cleanup` | teardown failure | logged by the guard, never propagated |
//!
//! ## Architecture
//!
//! - [`config`] - the target service (base URL, timeout, api key)
//! - [`endpoint`] / [`request`] - endpoint catalog entries and request construction
//! - [`client`] - the blocking HTTP client
//! - [`expect`] / [`verify`] - declarative expectations and the aggregate verifier
//! - [`predicate`] - numeric filter predicates over result collections
//! - [`pagination`] - page envelopes, the division rule, the walker
//! - [`schema`] - the named JSON-schema registry
//! - [`reconcile`] / [`store`] - cross-source reconciliation and the store seam
//! - [`session`] - credentials and bearer sessions
//! - [`scenario`] - scenario contexts with scoped cleanup

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod expect;
pub mod pagination;
pub mod predicate;
pub mod reconcile;
pub mod request;
pub mod scenario;
pub mod schema;
pub mod session;
pub mod store;
pub mod verify;

// Re-export commonly used types
pub use client::{ApiClient, ApiResponse};
pub use config::TargetConfig;
pub use endpoint::Endpoint;
pub use error::{ContractError, ContractResult};
pub use expect::ResponseExpectation;
pub use pagination::{Page, PaginationWalker, expected_len, last_page};
pub use predicate::{CmpOp, FilterPredicate};
pub use reconcile::{IgnorePaths, TimeWindow, reconcile};
pub use request::{RequestBuilder, RequestSpec};
pub use scenario::Scenario;
pub use schema::SchemaRegistry;
pub use session::{Credentials, Session, login};
pub use store::EntityStore;
pub use verify::{Verifier, VerifyReport};

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("covenant_contract={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

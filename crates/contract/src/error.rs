//! Error types for contract verification.
//!
//! This module defines the error taxonomy used throughout the engine,
//! separating unmet expectations from request construction problems and
//! transport-level failures.
//!
//! # Propagation policy
//!
//! | Error | When | Effect |
//! |-------|------|--------|
//! | `Assertion` | an expectation was not met | aborts the current scenario |
//! | `Construction` | malformed request, before any network call | aborts the current scenario |
//! | `Transport` | network or connection problem | surfaced as-is, never retried |
//! | `Schema` | schema registry problem (unknown name, bad document) | aborts the current scenario |
//! | `Cleanup` | teardown could not release an entity | logged by the scenario guard, never propagated |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for contract verification operations.
#[derive(Error, Debug)]
pub enum ContractError {
    /// One or more expectations were not met.
    ///
    /// The message lists every failed check with expected versus actual
    /// values, so a single run reports all mismatches rather than only
    /// the first one.
    #[error("{} expectation(s) not met:\n  - {}", .failures.len(), .failures.join("\n  - "))]
    Assertion { failures: Vec<String> },

    /// The request could not be constructed.
    ///
    /// Raised before any network I/O, e.g. for an unresolved path
    /// placeholder or an invalid header value.
    #[error("request construction failed: {message}")]
    Construction { message: String },

    /// The request could not be delivered or the response not received.
    ///
    /// Never retried: masking flakiness is undesirable in contract tests.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A named schema could not be loaded, compiled, or found.
    ///
    /// Validation mismatches against a healthy schema are reported as
    /// [`ContractError::Assertion`], not as this variant.
    #[error("schema '{name}': {message}")]
    Schema { name: String, message: String },

    /// Teardown could not release a created entity.
    ///
    /// Constructed only by the scenario cleanup guard, which logs it and
    /// moves on to the remaining cleanup items.
    #[error("cleanup of {entity} failed: {source}")]
    Cleanup {
        entity: String,
        #[source]
        source: Box<ContractError>,
    },
}

impl ContractError {
    /// Builds an assertion error from a single failure message.
    pub fn assertion(failure: impl Into<String>) -> Self {
        ContractError::Assertion {
            failures: vec![failure.into()],
        }
    }

    /// Builds a construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        ContractError::Construction {
            message: message.into(),
        }
    }
}

/// Result type alias for contract verification operations.
pub type ContractResult<T> = Result<T, ContractError>;

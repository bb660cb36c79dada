//! Common test utilities for the acceptance suite.
//!
//! - [`service`] - the in-process mock of the customer/countries API
//! - [`harness`] - the suite harness wiring service, client, and schemas

// Each integration test binary compiles this module separately and uses a
// different slice of it.
#![allow(dead_code)]

pub mod harness;
pub mod service;

pub use harness::SuiteHarness;

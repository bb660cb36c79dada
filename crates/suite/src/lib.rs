//! # covenant-suite - Customer/Countries API Acceptance Suite
//!
//! The acceptance suite for the customer/countries service, built on the
//! [`covenant_contract`] engine. This library crate holds the static parts
//! every scenario shares:
//!
//! - [`fixtures`] - the endpoint catalog, expected headers, credentials,
//!   the api key, and the reference country dataset
//! - [`models`] - typed request/response entities per endpoint, with value
//!   equality
//!
//! The scenarios themselves live under `tests/`, one file per surface
//! (countries, login, user lifecycle, card, GraphQL). They run against an
//! in-process mock of the service by default; point `COVENANT_BASE_URL` at
//! a real deployment to run the same scenarios against it.
//!
//! JSON schemas for response shapes live under `schemas/`, one document
//! per shape, loaded by file stem into the engine's schema registry.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod fixtures;
pub mod models;

//! Response verification.
//!
//! The [`Verifier`] applies a [`ResponseExpectation`] to a received
//! response. Every configured check runs; failures accumulate into a
//! [`VerifyReport`] so a single run reports all mismatches, not just the
//! first. Schema checks delegate to a [`SchemaRegistry`]; registry-level
//! problems (unknown name, no registry configured) abort the scenario,
//! while validation mismatches join the report like any other failure.

use serde_json::Value;

use crate::client::ApiResponse;
use crate::error::{ContractError, ContractResult};
use crate::expect::ResponseExpectation;
use crate::schema::SchemaRegistry;

/// Accumulated verification failures.
#[derive(Debug, Default)]
pub struct VerifyReport {
    failures: Vec<String>,
}

impl VerifyReport {
    /// Starts an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    /// Records a batch of failures.
    pub fn extend(&mut self, failures: impl IntoIterator<Item = String>) {
        self.failures.extend(failures);
    }

    /// Returns true when no check failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The recorded failures, in check order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Converts the report into a result, erroring when anything failed.
    pub fn into_result(self) -> ContractResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ContractError::Assertion {
                failures: self.failures,
            })
        }
    }
}

/// Applies expectations to responses.
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a> {
    schemas: Option<&'a SchemaRegistry>,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier without schema support.
    ///
    /// Verifying an expectation that names a schema then aborts with
    /// [`ContractError::Schema`].
    pub fn new() -> Self {
        Self { schemas: None }
    }

    /// Creates a verifier that resolves schema names in the registry.
    pub fn with_schemas(schemas: &'a SchemaRegistry) -> Self {
        Self {
            schemas: Some(schemas),
        }
    }

    /// Verifies the response, erroring on the full set of unmet checks.
    pub fn verify(
        &self,
        response: &ApiResponse,
        expectation: &ResponseExpectation,
    ) -> ContractResult<()> {
        self.check(response, expectation)?.into_result()
    }

    /// Runs every configured check and returns the aggregate report.
    pub fn check(
        &self,
        response: &ApiResponse,
        expectation: &ResponseExpectation,
    ) -> ContractResult<VerifyReport> {
        let mut report = VerifyReport::new();

        if let Some(expected) = expectation.status {
            let actual = response.status.as_u16();
            if actual != expected {
                report.fail(format!("expected status {}, got {}", expected, actual));
            }
        }

        for (name, expected) in &expectation.headers {
            match response.headers.get(name) {
                None => report.fail(format!("missing header '{}'", name)),
                Some(actual) => match actual.to_str() {
                    Ok(actual) if actual == expected => {}
                    Ok(actual) => report.fail(format!(
                        "header '{}': expected '{}', got '{}'",
                        name, expected, actual
                    )),
                    Err(_) => report.fail(format!("header '{}' is not valid UTF-8", name)),
                },
            }
        }

        let needs_body = expectation.schema.is_some()
            || expectation.body.is_some()
            || !expectation.predicates.is_empty();
        if needs_body {
            match response.json() {
                Ok(body) => self.check_body(&body, expectation, &mut report)?,
                Err(ContractError::Assertion { failures }) => report.extend(failures),
                Err(other) => return Err(other),
            }
        }

        Ok(report)
    }

    fn check_body(
        &self,
        body: &Value,
        expectation: &ResponseExpectation,
        report: &mut VerifyReport,
    ) -> ContractResult<()> {
        if let Some(name) = &expectation.schema {
            let registry = self.schemas.ok_or_else(|| ContractError::Schema {
                name: name.clone(),
                message: "no schema registry configured".to_string(),
            })?;
            for diagnostic in registry.validate(name, body)? {
                report.fail(format!("schema '{}': {}", name, diagnostic));
            }
        }

        if let Some(expected) = &expectation.body {
            report.extend(body_equality_failures(body, expected));
        }

        for predicate in &expectation.predicates {
            match body.as_array() {
                Some(items) => report.extend(predicate.check_all(items)),
                None => report.fail(format!(
                    "predicate '{}' requires an array body, got {}",
                    predicate,
                    type_name(body)
                )),
            }
        }

        Ok(())
    }
}

impl Default for Verifier<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality where arrays compare as multisets.
///
/// Two arrays are equal when they have the same length and there is a
/// one-to-one matching between their elements; element order does not
/// matter. Objects compare key-for-key; scalars compare by value.
pub fn multiset_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            // Find-and-remove matching; quadratic, fine at fixture sizes.
            let mut remaining: Vec<&Value> = ys.iter().collect();
            for x in xs {
                match remaining.iter().position(|y| multiset_eq(x, y)) {
                    Some(idx) => {
                        remaining.swap_remove(idx);
                    }
                    None => return false,
                }
            }
            true
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| multiset_eq(x, y)))
        }
        _ => a == b,
    }
}

/// Reports how an actual body differs from an expected one.
///
/// For array bodies, missing and unexpected elements are reported
/// separately so a duplicated element cannot mask an absent one.
fn body_equality_failures(actual: &Value, expected: &Value) -> Vec<String> {
    match (actual, expected) {
        (Value::Array(got), Value::Array(want)) => {
            let mut failures = Vec::new();
            if got.len() != want.len() {
                failures.push(format!(
                    "body length mismatch: expected {} element(s), got {}",
                    want.len(),
                    got.len()
                ));
            }
            let mut unmatched: Vec<&Value> = got.iter().collect();
            for wanted in want {
                match unmatched.iter().position(|g| multiset_eq(g, wanted)) {
                    Some(idx) => {
                        unmatched.swap_remove(idx);
                    }
                    None => failures.push(format!("expected element not found in body: {}", wanted)),
                }
            }
            for extra in unmatched {
                failures.push(format!("unexpected element in body: {}", extra));
            }
            failures
        }
        _ => {
            if multiset_eq(actual, expected) {
                Vec::new()
            } else {
                vec![format!("body mismatch: expected {}, got {}", expected, actual)]
            }
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

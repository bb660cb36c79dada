//! Named JSON-schema registry.
//!
//! A [`SchemaRegistry`] holds compiled JSON-schema documents keyed by name.
//! Schemas are compiled once, at registration time, and validated against
//! many response bodies afterwards. The usual setup loads every `*.json`
//! file from a schema directory, using the file stem as the name:
//!
//! ```rust,no_run
//! use covenant_contract::SchemaRegistry;
//!
//! let registry = SchemaRegistry::load_dir("schemas").unwrap();
//! ```
//!
//! Registry-level problems (unknown name, unreadable or uncompilable
//! document) are [`ContractError::Schema`]; a body that fails validation
//! against a healthy schema is an expectation mismatch and surfaces as
//! diagnostics for the verifier's report instead.

use std::collections::HashMap;
use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use crate::error::{ContractError, ContractResult};

/// A registry of compiled JSON schemas, keyed by name.
pub struct SchemaRegistry {
    schemas: HashMap<String, JSONSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Loads every `*.json` file in a directory, named by file stem.
    pub fn load_dir(dir: impl AsRef<Path>) -> ContractResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| ContractError::Schema {
            name: dir.display().to_string(),
            message: format!("cannot read schema directory: {}", e),
        })?;

        let mut registry = Self::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ContractError::Schema {
                    name: dir.display().to_string(),
                    message: format!("cannot read schema directory entry: {}", e),
                })?
                .path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let raw = std::fs::read_to_string(&path).map_err(|e| ContractError::Schema {
                name: name.clone(),
                message: format!("cannot read '{}': {}", path.display(), e),
            })?;
            let document: Value =
                serde_json::from_str(&raw).map_err(|e| ContractError::Schema {
                    name: name.clone(),
                    message: format!("'{}' is not valid JSON: {}", path.display(), e),
                })?;
            registry.register(&name, &document)?;
        }
        debug!(
            dir = %dir.display(),
            count = registry.schemas.len(),
            "Loaded schema registry"
        );
        Ok(registry)
    }

    /// Compiles and registers a schema document under a name.
    ///
    /// Re-registering a name replaces the previous schema.
    pub fn register(&mut self, name: &str, document: &Value) -> ContractResult<()> {
        let compiled = JSONSchema::compile(document).map_err(|e| ContractError::Schema {
            name: name.to_string(),
            message: format!("schema does not compile: {}", e),
        })?;
        self.schemas.insert(name.to_string(), compiled);
        Ok(())
    }

    /// Returns the registered names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Validates an instance against the named schema.
    ///
    /// Returns one diagnostic per violation, each carrying the instance
    /// path and the validator's message; an empty vector means the
    /// instance conforms. An unknown name is a [`ContractError::Schema`].
    pub fn validate(&self, name: &str, instance: &Value) -> ContractResult<Vec<String>> {
        let schema = self.schemas.get(name).ok_or_else(|| ContractError::Schema {
            name: name.to_string(),
            message: format!(
                "no schema registered under that name (have: {})",
                self.sorted_names().join(", ")
            ),
        })?;

        let diagnostics = match schema.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("at {}: {}", path, e)
                    }
                })
                .collect(),
        };
        Ok(diagnostics)
    }

    fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("names", &self.sorted_names())
            .finish()
    }
}

//! Backing-store seam for reconciliation.
//!
//! Reconciling an API view against persisted state needs exactly one
//! capability: read the stored representation of an entity by identifier.
//! [`EntityStore`] is that narrow seam. The engine never names a
//! persistence technology; a deployment implements the trait over its
//! database session, and the suite's in-process mock implements it over a
//! shared map.

use serde_json::Value;

use crate::error::{ContractError, ContractResult};
use crate::reconcile::{IgnorePaths, reconcile};

/// Read-only fetch-by-id access to a backing store.
pub trait EntityStore {
    /// Reads the stored representation of an entity, child collections
    /// included, or `None` when no such entity is persisted.
    fn fetch(&self, entity_type: &str, id: &str) -> ContractResult<Option<Value>>;

    /// Fetches the stored entity and reconciles the API view against it.
    ///
    /// A missing entity and any structural difference outside the ignore
    /// set are assertion failures.
    fn reconcile_with(
        &self,
        entity_type: &str,
        id: &str,
        api_view: &Value,
        ignore: &IgnorePaths,
    ) -> ContractResult<()> {
        let stored = self.fetch(entity_type, id)?.ok_or_else(|| {
            ContractError::assertion(format!(
                "{} '{}' is absent from the backing store",
                entity_type, id
            ))
        })?;

        let failures = reconcile(api_view, &stored, ignore);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ContractError::Assertion {
                failures: failures
                    .into_iter()
                    .map(|f| format!("api view vs store for {} '{}': {}", entity_type, id, f))
                    .collect(),
            })
        }
    }
}

//! Scenario context and scoped cleanup.
//!
//! A [`Scenario`] owns the teardown actions registered while a test body
//! runs. Registration happens at creation time: any entity created as a
//! precondition registers its deletion before the scenario proceeds, so
//! release is guaranteed on every exit path, including early `?` returns
//! and panics (the guard runs from `Drop`).
//!
//! Cleanup failures are logged at `warn` and never propagated. A failing
//! delete cannot mask the scenario's own verdict, and it cannot stop the
//! remaining cleanup items from running either.

use tracing::{debug, warn};

use crate::error::{ContractError, ContractResult};

type CleanupFn = Box<dyn FnOnce() -> ContractResult<()>>;

struct CleanupItem {
    label: String,
    action: CleanupFn,
}

/// A per-scenario context owning scoped teardown actions.
///
/// # Example
///
/// ```rust
/// use covenant_contract::{ContractResult, Scenario};
///
/// fn scenario() -> ContractResult<()> {
///     let mut scenario = Scenario::new("user lifecycle");
///     // ... create a user, then immediately:
///     scenario.defer("user 42", || {
///         // delete user 42
///         Ok(())
///     });
///     // ... assertions; the deferred delete runs even if they fail
///     Ok(())
/// }
/// ```
pub struct Scenario {
    name: String,
    cleanup: Vec<CleanupItem>,
}

impl Scenario {
    /// Starts a scenario context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cleanup: Vec::new(),
        }
    }

    /// The scenario's name, used in cleanup logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a teardown action for an entity this scenario created.
    ///
    /// Actions run in reverse registration order, so entities created on
    /// top of one another are released innermost first.
    pub fn defer<F>(&mut self, label: impl Into<String>, action: F)
    where
        F: FnOnce() -> ContractResult<()> + 'static,
    {
        let label = label.into();
        debug!(scenario = %self.name, entity = %label, "Registered cleanup");
        self.cleanup.push(CleanupItem {
            label,
            action: Box::new(action),
        });
    }

    /// Number of cleanup actions still pending.
    pub fn pending_cleanup(&self) -> usize {
        self.cleanup.len()
    }

    /// Runs all pending teardown actions now, newest first.
    ///
    /// Failures are logged and counted, never propagated; the return
    /// value is the number of actions that failed. Dropping the scenario
    /// without calling this runs the same actions from the guard.
    pub fn teardown(&mut self) -> usize {
        let mut failed = 0;
        while let Some(item) = self.cleanup.pop() {
            match (item.action)() {
                Ok(()) => {
                    debug!(scenario = %self.name, entity = %item.label, "Cleaned up");
                }
                Err(source) => {
                    failed += 1;
                    let err = ContractError::Cleanup {
                        entity: item.label,
                        source: Box::new(source),
                    };
                    warn!(scenario = %self.name, error = %err, "Cleanup failure (ignored)");
                }
            }
        }
        failed
    }
}

impl Drop for Scenario {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("pending_cleanup", &self.cleanup.len())
            .finish()
    }
}

//! Operation traits shared by every command.
//!
//! A command is a struct whose fields are its parameters. It names itself
//! through [`Operation`] and does its work in [`Execute::execute`], returning
//! a JSON value the front end renders.

use crate::context::InventoryContext;
use crate::error::Result;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info_span, warn};

/// Identity of a command
pub trait Operation {
    /// Verb, e.g. `add`
    fn verb(&self) -> &'static str;

    /// Noun, e.g. `drawer`
    fn noun(&self) -> &'static str;

    /// Whether the command writes to storage
    fn is_mutation(&self) -> bool {
        true
    }

    /// Canonical op string, e.g. `add drawer`
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run a command against the inventory
pub trait Execute: Operation {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value>;
}

/// Run a command inside a tracing span, logging how it went and how long
/// it took.
pub fn process<O: Execute + ?Sized>(op: &O, ctx: &mut InventoryContext) -> Result<Value> {
    let op_string = op.op_string();
    let _span = info_span!("op", op = %op_string).entered();
    let start = Instant::now();

    let result = op.execute(ctx);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => debug!(op = %op_string, duration_ms, mutation = op.is_mutation(), "operation succeeded"),
        Err(e) if e.is_user_error() => debug!(op = %op_string, duration_ms, error = %e, "operation rejected"),
        Err(e) => warn!(op = %op_string, duration_ms, error = %e, "operation failed"),
    }
    result
}

/// Reject empty or whitespace-only names
pub(crate) fn require_name(field: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::error::InventoryError::invalid_value(
            field,
            "name must not be empty",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryConfig;
    use crate::error::InventoryError;
    use tempfile::TempDir;

    struct Probe {
        fail: bool,
    }

    impl Operation for Probe {
        fn verb(&self) -> &'static str {
            "probe"
        }

        fn noun(&self) -> &'static str {
            "inventory"
        }

        fn is_mutation(&self) -> bool {
            false
        }
    }

    impl Execute for Probe {
        fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
            if self.fail {
                return Err(InventoryError::ContainerNotFound { name: "x".into() });
            }
            Ok(serde_json::json!({ "containers": ctx.containers().len() }))
        }
    }

    #[test_log::test]
    fn test_process_passes_result_through() {
        let temp = TempDir::new().unwrap();
        let config = InventoryConfig::default().with_data_dir(temp.path());
        let mut ctx = InventoryContext::open(config).unwrap();

        let probe = Probe { fail: false };
        assert_eq!(probe.op_string(), "probe inventory");
        let value = process(&probe, &mut ctx).unwrap();
        assert_eq!(value["containers"], 0);

        let result = process(&Probe { fail: true }, &mut ctx);
        assert!(matches!(result, Err(InventoryError::ContainerNotFound { .. })));
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("name", "  top ").unwrap(), "top");
        assert!(matches!(
            require_name("name", "   "),
            Err(InventoryError::InvalidValue { .. })
        ));
    }
}

//! The calculator core: operation registry, request validation, and
//! dispatch. Everything in this module is pure and synchronous; transport
//! concerns (envelopes, logging, metrics) live in `crate::api`.

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod validate;

pub use dispatch::dispatch;
pub use error::{CalcError, Result};
pub use registry::{Operation, Registry};
pub use validate::{validate, ValidatedArgs};

use serde_json::Value;

/// Resolve, validate, and dispatch a single call.
///
/// This is the full tool-invocation contract in one place: `name` must
/// match a registered operation exactly, `args` must carry exactly the
/// operation's parameters as finite numbers, and only then does any
/// arithmetic run.
pub fn invoke(registry: &Registry, name: &str, args: Option<&Value>) -> Result<f64> {
    let op = registry
        .lookup(name)
        .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;
    let args = validate(op, args)?;
    dispatch(op, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invoke_runs_the_full_pipeline() {
        let registry = Registry::new();
        let args = json!({"a": 5.0, "b": 3.0});
        assert_eq!(invoke(&registry, "add", Some(&args)).unwrap(), 8.0);
    }

    #[test]
    fn invoke_rejects_unknown_operation_before_looking_at_args() {
        let registry = Registry::new();
        let args = json!({"whatever": true});
        let err = invoke(&registry, "nonexistent", Some(&args)).unwrap_err();
        assert_eq!(err, CalcError::UnknownOperation("nonexistent".to_string()));
    }

    #[test]
    fn invoke_is_case_sensitive() {
        let registry = Registry::new();
        let args = json!({"a": 1.0, "b": 2.0});
        assert!(matches!(
            invoke(&registry, "Add", Some(&args)),
            Err(CalcError::UnknownOperation(_))
        ));
    }
}

//! Strict argument validation: exactly the declared parameters, every
//! value a finite number. Extra keys are rejected rather than ignored so
//! that broken client integrations surface immediately.

use crate::calc::error::{CalcError, Result};
use crate::calc::registry::{Operation, PARAMS};
use serde_json::{Map, Value};

/// Operands bound to the operation's parameter order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedArgs {
    pub a: f64,
    pub b: f64,
}

/// Validate the raw `arguments` value against an operation's parameters.
///
/// Checks run in order: required parameters present, no unexpected keys,
/// every value a finite number. An absent or empty mapping fails on the
/// first missing parameter.
pub fn validate(op: &Operation, args: Option<&Value>) -> Result<ValidatedArgs> {
    let map = match args {
        None => {
            return Err(CalcError::MissingArgument {
                op: op.name,
                name: PARAMS[0],
            })
        }
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(CalcError::InvalidArgumentType {
                name: "arguments".to_string(),
            })
        }
    };

    for name in PARAMS {
        if !map.contains_key(name) {
            return Err(CalcError::MissingArgument { op: op.name, name });
        }
    }

    if let Some(extra) = map.keys().find(|key| !PARAMS.contains(&key.as_str())) {
        return Err(CalcError::UnexpectedArgument {
            op: op.name,
            name: extra.clone(),
        });
    }

    let [a, b] = PARAMS.map(|name| number(map, name));
    Ok(ValidatedArgs { a: a?, b: b? })
}

fn number(map: &Map<String, Value>, name: &'static str) -> Result<f64> {
    map.get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::InvalidArgumentType {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::registry::Registry;
    use serde_json::json;

    fn op() -> Operation {
        *Registry::new().lookup("add").unwrap()
    }

    #[test]
    fn accepts_exactly_the_declared_params() {
        let args = json!({"a": 1.5, "b": -2.0});
        let validated = validate(&op(), Some(&args)).unwrap();
        assert_eq!(validated, ValidatedArgs { a: 1.5, b: -2.0 });
    }

    #[test]
    fn integers_are_accepted_as_numbers() {
        let args = json!({"a": 5, "b": 3});
        let validated = validate(&op(), Some(&args)).unwrap();
        assert_eq!(validated, ValidatedArgs { a: 5.0, b: 3.0 });
    }

    #[test]
    fn missing_argument_is_rejected() {
        let args = json!({"a": 1});
        let err = validate(&op(), Some(&args)).unwrap_err();
        assert_eq!(
            err,
            CalcError::MissingArgument {
                op: "add",
                name: "b"
            }
        );

        // No arguments at all fails on the first parameter
        let err = validate(&op(), None).unwrap_err();
        assert_eq!(
            err,
            CalcError::MissingArgument {
                op: "add",
                name: "a"
            }
        );
    }

    #[test]
    fn extra_argument_is_rejected_not_ignored() {
        let args = json!({"a": 1, "b": 2, "c": 3});
        let err = validate(&op(), Some(&args)).unwrap_err();
        assert_eq!(
            err,
            CalcError::UnexpectedArgument {
                op: "add",
                name: "c".to_string()
            }
        );
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        for bad in [json!("x"), json!(true), json!(null), json!([1]), json!({})] {
            let args = json!({"a": bad, "b": 2});
            let err = validate(&op(), Some(&args)).unwrap_err();
            assert_eq!(
                err,
                CalcError::InvalidArgumentType {
                    name: "a".to_string()
                }
            );
        }
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let args = json!([1, 2]);
        let err = validate(&op(), Some(&args)).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidArgumentType {
                name: "arguments".to_string()
            }
        );
    }

    #[test]
    fn validation_order_is_missing_then_extra_then_type() {
        // Missing wins over extra
        let args = json!({"a": 1, "c": 3});
        assert!(matches!(
            validate(&op(), Some(&args)),
            Err(CalcError::MissingArgument { name: "b", .. })
        ));

        // Extra wins over type
        let args = json!({"a": "x", "b": 2, "c": 3});
        assert!(matches!(
            validate(&op(), Some(&args)),
            Err(CalcError::UnexpectedArgument { .. })
        ));
    }
}

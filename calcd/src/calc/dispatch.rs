//! The dispatcher and the four operations. Pure functions only; IEEE-754
//! overflow and underflow pass through unmodified.

use crate::calc::error::{CalcError, Result};
use crate::calc::registry::Operation;
use crate::calc::validate::ValidatedArgs;

/// Invoke an operation with validated operands
pub fn dispatch(op: &Operation, args: ValidatedArgs) -> Result<f64> {
    (op.apply)(args.a, args.b)
}

pub(crate) fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

pub(crate) fn subtract(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

pub(crate) fn multiply(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

/// Exact zero comparison, checked before any division runs. `-0.0`
/// compares equal to `0.0` and is rejected too.
pub(crate) fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        Err(CalcError::DivisionByZero)
    } else {
        Ok(a / b)
    }
}

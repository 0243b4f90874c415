use thiserror::Error;

/// Failures of the tool-invocation contract.
///
/// Every variant is client-caused and surfaced synchronously in the same
/// response cycle; there is no internal-fault category because valid input
/// cannot make the arithmetic fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("missing argument '{name}' for operation '{op}'")]
    MissingArgument { op: &'static str, name: &'static str },

    #[error("unexpected argument '{name}' for operation '{op}'")]
    UnexpectedArgument { op: &'static str, name: String },

    #[error("argument '{name}' must be a finite number")]
    InvalidArgumentType { name: String },

    #[error("division by zero: the divisor 'b' must be nonzero")]
    DivisionByZero,
}

impl CalcError {
    /// True for errors raised before any arithmetic runs
    pub fn is_validation(&self) -> bool {
        !matches!(self, CalcError::DivisionByZero)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

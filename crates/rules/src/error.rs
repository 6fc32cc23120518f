//! Error taxonomy for rule parsing and evaluation.

use firmo_core::attr::AttributeError;

/// Definition errors raised while decoding a rule-creation payload.
/// Client-facing and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The `operation` block is neither a condition object nor an
    /// AND/OR wrapper object.
    #[error("invalid operation block")]
    InvalidOperationBlock,
    /// The `operation` block is a bare list. Reported under its own
    /// message, distinct from [`ParseError::InvalidOperationBlock`].
    #[error("invalid boolean operator")]
    InvalidBooleanOperator,
    /// A condition entry is not an object or lacks a required field.
    #[error("invalid condition format")]
    InvalidConditionFormat,
    /// The surrounding rule payload is missing a required field.
    #[error("missing rule field '{0}'")]
    MissingField(&'static str),
}

/// Failures during rule application. Resolution and coercion errors are
/// fatal to the whole rule application; the caller decides whether to
/// skip the entity or fail the batch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// An ordering operator met a side that does not parse as a number.
    #[error("cannot coerce '{value}' to a number for {operator}")]
    NumericCoercion { operator: String, value: String },

    /// More than one condition under an operator other than AND/OR.
    #[error("unsupported boolean operator: {0}")]
    UnsupportedBooleanOperator(String),
}

use crate::params::info::ParamType;
use thiserror::Error;

/// Error types for the bip-params library.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Error when adding a parameter whose name is already taken.
    #[error("Parameter '{name}' already exists in the group")]
    DuplicateName { name: String },

    /// Error when an operation names a parameter that is not in the group.
    #[error("No parameter named '{name}' in the group")]
    NameNotFound { name: String },

    /// Error when a value's type does not match the declared parameter type.
    #[error("Parameter '{name}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ParamType,
        actual: ParamType,
    },

    /// Error when a value's element count does not match the declared shape.
    #[error("Parameter '{name}' expects {expected} element(s), got {actual}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Error when a value element violates a declared constraint.
    #[error("Constraint violation for parameter '{name}': {message}")]
    ConstraintViolation { name: String, message: String },

    /// Error when a value cannot be flattened to a numeric array.
    #[error("Cannot flatten parameter '{name}': {message}")]
    Flatten { name: String, message: String },

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for bip-params operations.
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Extensions for converting from other error types.
impl From<String> for ParamsError {
    fn from(s: String) -> Self {
        ParamsError::Other(s)
    }
}

impl From<&str> for ParamsError {
    fn from(s: &str) -> Self {
        ParamsError::Other(s.to_string())
    }
}

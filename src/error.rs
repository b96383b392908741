//! Error types for kernel configuration

use thiserror::Error;

/// Result type alias for kernel configuration operations
pub type Result<T> = std::result::Result<T, KernelError>;

/// Main error type for kernel and prior configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A value could not be interpreted at all (e.g. unparseable text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value was understood but lies outside its allowed domain
    #[error("Constraint violation: {name} = {value}, {reason}")]
    ConstraintViolation {
        name: String,
        value: String,
        reason: String,
    },

    /// A value does not provide the capability its field requires
    #[error("Type constraint violated for '{field}': expected {expected}, found {found}")]
    TypeConstraint {
        field: String,
        expected: String,
        found: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },
}

impl KernelError {
    pub(crate) fn constraint(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        KernelError::ConstraintViolation {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_constraint(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        KernelError::TypeConstraint {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl From<serde_json::Error> for KernelError {
    fn from(err: serde_json::Error) -> Self {
        KernelError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KernelError::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "Invalid input: test error");
    }

    #[test]
    fn test_constraint_display() {
        let err = KernelError::constraint("nu", 3.5, "must be one of [0.5, 1.5, 2.5]");
        assert_eq!(
            err.to_string(),
            "Constraint violation: nu = 3.5, must be one of [0.5, 1.5, 2.5]"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: KernelError = json_err.into();
        assert!(matches!(err, KernelError::SerializationError(_)));
    }
}

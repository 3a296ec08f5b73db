//! Error types for transform algebra.
//!
//! Algebraic failures abort the enclosing operation before any state is
//! modified, so callers can retry or branch without cleaning up.

use thiserror::Error;

/// Main error type for transform operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A setter received a value that does not fit the transform's kind
    /// (e.g. a rotation applied to a displacement field).
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// The linear part cannot be inverted or factorised.
    #[error("Singular transform: determinant {determinant:e} is below {epsilon:e}")]
    SingularTransform { determinant: f64, epsilon: f64 },

    /// The operation is not meaningful for the transform's current kind.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A parameter is outside its valid domain (zero-length axis, bad slice length).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    /// Create a type mismatch error.
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Create a singular transform error.
    pub fn singular(determinant: f64, epsilon: f64) -> Self {
        Self::SingularTransform { determinant, epsilon }
    }

    /// Create an unsupported operation error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TransformError::type_mismatch("rotation on field");
        assert!(matches!(err, TransformError::TypeMismatch(_)));
    }

    #[test]
    fn test_error_display() {
        let err = TransformError::unsupported("inverse of displacement field");
        assert_eq!(
            err.to_string(),
            "Unsupported operation: inverse of displacement field"
        );
    }

    #[test]
    fn test_singular_display() {
        let err = TransformError::singular(0.0, 1e-12);
        let msg = err.to_string();
        assert!(msg.contains("Singular transform"));
        assert!(msg.contains("1e-12"));
    }
}

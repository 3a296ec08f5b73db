//! Error types for registry and propagation operations.

use thiserror::Error;
use voxreg_core::TransformError;

/// Main error type for registry operations.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// A registry holds no transform under the requested key.
    #[error("Key not found: registry of '{reference}' has no transform to '{key}'")]
    KeyNotFound { reference: String, key: String },

    /// Transform algebra failed (singular forward transform, kind misuse).
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The registry store could not save or load a registry.
    #[error("Persistence error for space '{space}': {message}")]
    Persistence { space: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;

impl RegistrationError {
    /// Create a key-not-found error.
    pub fn key_not_found(reference: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            reference: reference.into(),
            key: key.into(),
        }
    }

    /// Create a persistence error.
    pub fn persistence(space: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            space: space.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

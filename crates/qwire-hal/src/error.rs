//! Error types for the engine client crate.

use thiserror::Error;

/// Errors that can occur when talking to a simulation engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The engine answered with a non-success status.
    #[error("Engine error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The engine answered, but the body holds no usable result.
    #[error("No usable result from engine: {0}")]
    ResponseShape(String),

    /// The request was rejected before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<qwire_compile::CompileError> for HalError {
    fn from(e: qwire_compile::CompileError) -> Self {
        HalError::InvalidRequest(e.to_string())
    }
}

/// Result type for engine operations.
pub type HalResult<T> = Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = HalError::Api {
            status: 503,
            message: "Service unavailable".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service unavailable"));
    }

    #[test]
    fn test_response_shape_display() {
        let err = HalError::ResponseShape("missing 'probabilities'".into());
        assert!(err.to_string().starts_with("No usable result"));
        assert!(err.to_string().contains("probabilities"));
    }

    #[test]
    fn test_serialization_from_json_error() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: HalError = json_err.into();
        assert!(matches!(err, HalError::Serialization(_)));
    }

    #[test]
    fn test_compile_error_is_invalid_request() {
        let err: HalError = qwire_compile::CompileError::TableauMismatch {
            expected: 2,
            found: 3,
        }
        .into();
        assert!(matches!(err, HalError::InvalidRequest(_)));
    }
}

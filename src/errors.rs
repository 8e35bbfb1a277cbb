// src/errors.rs
// DOCUMENTATION: Custom error types for the harvesting pipeline
// PURPOSE: Centralized error handling for entire application

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Covers configuration, user input, upstream API and export failures
/// Configuration errors abort early; upstream and export errors are handled softly by callers
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Export error: {0}")]
    ExportError(String),
}

impl PlacesError {
    /// Whether this error should stop the process before any network or file activity
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PlacesError::Configuration(_)
                | PlacesError::InvalidInput(_)
                | PlacesError::ValidationError(_)
        )
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(errors: validator::ValidationErrors) -> Self {
        PlacesError::ValidationError(errors.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for PlacesError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        PlacesError::ExportError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(PlacesError::Configuration("missing key".to_string()).is_configuration());
        assert!(PlacesError::ValidationError("query".to_string()).is_configuration());
        assert!(!PlacesError::RateLimitExceeded.is_configuration());
        assert!(!PlacesError::ExportError("disk full".to_string()).is_configuration());
    }

    #[test]
    fn test_error_messages() {
        let err = PlacesError::ExternalApiError("API error 500".to_string());
        assert_eq!(err.to_string(), "External API error: API error 500");
        assert_eq!(PlacesError::RateLimitExceeded.to_string(), "Rate limit exceeded");
    }
}

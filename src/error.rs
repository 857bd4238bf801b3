//! # Handler Errors
//!
//! Validation failures are raised before any provider call. Provider failures
//! are carried verbatim so the caller sees exactly what SNS reported.

use thiserror::Error;

/// A required property of the request is missing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required property {0}")]
    MissingProperty(&'static str),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(anyhow::Error),
}

impl HandlerError {
    /// Label used for the request error metric
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::Validation(_) => "validation",
            HandlerError::Provider(_) => "provider",
        }
    }

    /// Reason reported back to CloudFormation.
    ///
    /// Provider errors include their whole source chain. The SDK's top-level
    /// message for a service fault is only `service error`; the SNS code and
    /// message live in its sources.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            HandlerError::Validation(e) => e.to_string(),
            HandlerError::Provider(e) => format!("{e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_the_field() {
        let error = HandlerError::from(ValidationError::MissingProperty("Platform"));
        assert_eq!(error.to_string(), "Missing required property Platform");
        assert_eq!(error.kind(), "validation");
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let error = HandlerError::Provider(anyhow::anyhow!("InvalidParameter: bad certificate"));
        assert_eq!(error.to_string(), "InvalidParameter: bad certificate");
        assert_eq!(error.kind(), "provider");
    }

    #[test]
    fn test_reason_includes_provider_error_chain() {
        let inner = anyhow::anyhow!("InvalidParameter: Certificate is invalid").context("service error");
        let error = HandlerError::Provider(inner);

        assert_eq!(error.to_string(), "service error");
        assert_eq!(error.reason(), "service error: InvalidParameter: Certificate is invalid");
    }

    #[test]
    fn test_reason_for_validation_error() {
        let error = HandlerError::from(ValidationError::MissingProperty("Attributes"));
        assert_eq!(error.reason(), "Missing required property Attributes");
    }
}

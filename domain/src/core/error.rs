//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Credential cannot be empty")]
    EmptyCredential,

    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

impl DomainError {
    /// Check if this error comes from user input rather than configuration
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::EmptyQuestion | DomainError::EmptyCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyQuestion.to_string(), "Question cannot be empty");
        assert_eq!(
            DomainError::InvalidPageSize.to_string(),
            "Page size must be greater than zero"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(DomainError::EmptyQuestion.is_input_error());
        assert!(DomainError::EmptyCredential.is_input_error());
        assert!(!DomainError::InvalidPageSize.is_input_error());
    }
}

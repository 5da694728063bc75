//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{FlowError, SessionError};

use fa_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl DomainError {
    /// The inline message the form displays for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "Please check your details and try again.",
            DomainError::Internal { .. } => "Something went wrong. Please try again.",
            DomainError::Flow(e) => e.user_message(),
            DomainError::Session(e) => e.user_message(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, self.user_message())
                    .add_detail("reason", message)
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, self.user_message())
            }
            DomainError::Flow(e) => e.to_error_response(),
            DomainError::Session(e) => e.to_error_response(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

//! Domain-specific error types for the OTP verification flow
//!
//! This module provides error type definitions for the verification flow and
//! the session handoff. Each error carries a stable code for the host
//! application plus the inline message the form renders, so the presentation
//! layer never has to pattern-match on variants.

use fa_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Verification-flow errors
///
/// These errors represent the failure scenarios of the OTP entry form:
/// incomplete input, a rejected code, an unreachable verification boundary,
/// and operations against a flow that has already been torn down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Verification code incomplete: {filled} of {expected} digits entered")]
    IncompleteCode { filled: usize, expected: usize },

    #[error("Verification code rejected")]
    CodeRejected,

    #[error("Verification service unavailable: {message}")]
    VerifyUnavailable { message: String },

    #[error("Code dispatch failed: {message}")]
    ResendFailed { message: String },

    #[error("Verification flow closed")]
    FlowClosed,
}

impl FlowError {
    /// The inline message the form displays for this error.
    ///
    /// Rejected codes and an unreachable boundary deliberately read the same:
    /// the form never tells the user which of the two happened.
    pub fn user_message(&self) -> &'static str {
        match self {
            FlowError::IncompleteCode { .. } => "Please enter a valid 6-digit OTP",
            FlowError::CodeRejected => "Verification failed. Please try again.",
            FlowError::VerifyUnavailable { .. } => "Verification failed. Please try again.",
            FlowError::ResendFailed { .. } => "Failed to resend OTP. Please try again.",
            FlowError::FlowClosed => "Verification session is closed.",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FlowError::IncompleteCode { .. } => error_codes::CODE_INCOMPLETE,
            FlowError::CodeRejected => error_codes::CODE_REJECTED,
            FlowError::VerifyUnavailable { .. } => error_codes::VERIFY_UNAVAILABLE,
            FlowError::ResendFailed { .. } => error_codes::RESEND_FAILED,
            FlowError::FlowClosed => error_codes::FLOW_CLOSED,
        }
    }
}

impl IntoErrorResponse for FlowError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.user_message())
    }
}

/// Session-handoff errors
///
/// These errors represent failures while reading, promoting, or clearing the
/// staged registration in client storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No pending registration staged")]
    PendingRegistrationMissing,

    #[error("Stored record under '{key}' is not valid JSON")]
    RecordCorrupted { key: String },

    #[error("Storage failure: {message}")]
    StoreFailure { message: String },
}

impl SessionError {
    /// The inline message the form displays for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::PendingRegistrationMissing => {
                "Registration session expired. Please register again."
            }
            SessionError::RecordCorrupted { .. } => {
                "Stored session data is invalid. Please register again."
            }
            SessionError::StoreFailure { .. } => "Verification failed. Please try again.",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            SessionError::PendingRegistrationMissing => error_codes::PENDING_REGISTRATION_MISSING,
            SessionError::RecordCorrupted { .. } => error_codes::SESSION_RECORD_CORRUPTED,
            SessionError::StoreFailure { .. } => error_codes::STORAGE_ERROR,
        }
    }
}

impl IntoErrorResponse for SessionError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.user_message())
    }
}

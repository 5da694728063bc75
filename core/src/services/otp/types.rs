//! Types for the OTP verification flow

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Session, CODE_LENGTH};
use crate::errors::FlowError;

/// Lifecycle state of the verification request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// No request in flight; the form is editable
    Idle,
    /// A request is in flight; edits and duplicate submits are ignored
    Submitting,
    /// The code was accepted
    Verified,
}

/// A captured submission candidate
///
/// Snapshotted from the buffer at submit time so later edits cannot change
/// what was actually sent. The id ties log lines of one attempt together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Unique identifier for this attempt
    pub id: Uuid,
    /// The candidate code as entered
    pub code: String,
    /// When the attempt was submitted
    pub submitted_at: DateTime<Utc>,
}

impl VerificationRequest {
    /// Capture a candidate code as a new attempt
    pub fn new(code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            submitted_at: Utc::now(),
        }
    }
}

/// Result of submitting the entered code
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The code was accepted; carries the promoted session unless the flow
    /// tolerates a missing staged registration
    Verified(Option<Session>),
    /// The code was not accepted; the error names why
    Rejected(FlowError),
    /// Nothing happened: a submit was already in flight, or the flow closed
    /// while the request was out
    Ignored,
}

/// Result of requesting a fresh code
#[derive(Debug)]
pub enum ResendOutcome {
    /// A new code went out
    Dispatched {
        /// Provider message id
        message_id: String,
        /// When the next resend becomes possible
        next_resend_at: DateTime<Utc>,
    },
    /// Nothing happened: the cooldown is still counting, a submit is in
    /// flight, or the flow closed mid-dispatch
    Ignored,
}

/// One readable view of the flow for a rendering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    /// The number the code was dispatched to
    pub target: String,
    /// The six code slots
    pub slots: [Option<char>; CODE_LENGTH],
    /// Index of the slot holding focus
    pub focused_slot: usize,
    /// Whether every slot holds a digit
    pub is_complete: bool,
    /// Seconds left on the resend cooldown
    pub seconds_until_resend: u32,
    /// Whether the resend action is currently allowed
    pub can_resend: bool,
    /// The cooldown rendered as zero-padded `mm:ss`
    pub countdown_display: String,
    /// Lifecycle state of the verification request
    pub request: RequestState,
    /// Whether a submit is in flight (inputs should be disabled)
    pub is_busy: bool,
    /// The inline error message, newest wins; `None` when clear
    pub error: Option<String>,
}

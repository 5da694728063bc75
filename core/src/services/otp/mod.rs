//! OTP verification flow module
//!
//! This module drives the six-digit code entry form end to end:
//! - Slot-level editing of the entry buffer with focus tracking
//! - A one-per-second resend countdown with a background ticker
//! - The submit lifecycle with duplicate-submit protection
//! - Session promotion and navigation on an accepted code

mod config;
mod service;
mod ticker;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpFlowConfig;
pub use service::OtpFlowService;
pub use traits::{NavigatorTrait, ResendServiceTrait, VerifyServiceTrait};
pub use types::{FlowSnapshot, RequestState, ResendOutcome, SubmitOutcome, VerificationRequest};

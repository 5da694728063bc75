//! Business services containing domain logic and use cases.

pub mod otp;
pub mod session;

// Re-export commonly used types
pub use otp::{
    FlowSnapshot, NavigatorTrait, OtpFlowConfig, OtpFlowService, RequestState, ResendOutcome,
    ResendServiceTrait, SubmitOutcome, VerificationRequest, VerifyServiceTrait,
};
pub use session::{
    SessionService, PENDING_PHONE_KEY, PENDING_USER_KEY, SESSION_TOKEN_KEY, SESSION_USER_KEY,
};

//! Configuration for the OTP verification flow

use crate::domain::entities::countdown::RESEND_COOLDOWN_SECONDS;

/// Configuration for the OTP verification flow
#[derive(Debug, Clone)]
pub struct OtpFlowConfig {
    /// Seconds the resend action stays locked after a dispatch
    pub resend_cooldown_seconds: u32,

    /// Whether a successful verify requires a staged registration
    ///
    /// When set, an accepted code with nothing staged fails the submit
    /// instead of signalling success with no session behind it.
    pub require_pending_registration: bool,
}

impl Default for OtpFlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            require_pending_registration: true,
        }
    }
}

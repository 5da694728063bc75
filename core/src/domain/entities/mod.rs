//! Domain entities representing core business objects.

pub mod code_buffer;
pub mod countdown;
pub mod pending_registration;
pub mod session;
pub mod user_record;

// Re-export commonly used types
pub use code_buffer::{CodeBuffer, CODE_LENGTH};
pub use countdown::{CountdownPhase, ResendCountdown, RESEND_COOLDOWN_SECONDS};
pub use pending_registration::PendingRegistration;
pub use session::Session;
pub use user_record::UserRecord;

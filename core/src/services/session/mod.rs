//! Session handoff module
//!
//! This module owns the storage side of the verification flow:
//! - Staging a registration between the register and OTP steps
//! - Promoting the staged record into the permanent session
//! - The auth-gate read and sign-out

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    SessionService, PENDING_PHONE_KEY, PENDING_USER_KEY, SESSION_TOKEN_KEY, SESSION_USER_KEY,
};

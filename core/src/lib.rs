//! # FanArena Core
//!
//! Core business logic and domain layer for the FanArena client.
//! This crate contains the OTP entry and countdown entities, the flow and
//! session services, the storage interface, and the error types that form
//! the foundation of the verification feature.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;

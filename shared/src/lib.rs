//! Shared utilities and common types for the FanArena client core
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (environment detection, logging)
//! - Error response structures
//! - Utility functions (phone masking, input validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use utils::{phone, validation};

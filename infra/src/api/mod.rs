//! Auth API Module
//!
//! This module provides implementations of the verification and code
//! dispatch boundaries the flow service depends on.
//!
//! ## Features
//!
//! - **Mock Implementation**: Console output and per-target code tracking
//!   for development, with realistic latency
//! - **Target Validation**: National and E.164 format validation
//! - **Security**: Target masking in logs, constant-time code comparison

pub mod mock_auth;

// Re-export commonly used types
pub use mock_auth::MockAuthApi;

use crate::config::AuthApiConfig;

/// Create an auth API provider based on configuration
///
/// Returns the provider named in the configuration. Only the mock provider
/// exists today; unknown names fall back to it with a warning.
pub fn create_auth_api(config: &AuthApiConfig) -> MockAuthApi {
    match config.provider.as_str() {
        "mock" => MockAuthApi::from_config(config),
        other => {
            tracing::warn!(
                "Unknown auth API provider '{}', using mock implementation",
                other
            );
            MockAuthApi::from_config(config)
        }
    }
}

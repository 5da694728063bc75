//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the FanArena client
//! core, following Clean Architecture principles. It provides concrete
//! implementations for the boundaries the domain layer defines as traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Storage**: In-memory key-value session store
//! - **Auth API**: Verification and code dispatch implementations
//!
//! The auth API currently ships a mock provider that behaves like the real
//! endpoint (latency, dispatch ids, per-target codes) without any network.

// Re-export core types for convenience
pub use fa_core::errors::*;

/// Storage module - session store implementations
pub mod storage;

/// Auth API module - verification and code dispatch providers
pub mod api;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Handles:
    //! - Auth API provider selection and behavior
    //! - Environment-specific settings

    use fa_shared::config::AppConfig;
    use serde::{Deserialize, Serialize};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Application environment and logging configuration
        pub app: AppConfig,
        /// Auth API configuration
        pub auth_api: AuthApiConfig,
    }

    /// Auth API configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthApiConfig {
        /// Auth API provider ("mock")
        pub provider: String,
        /// Simulated round-trip latency in milliseconds
        pub latency_ms: u64,
        /// When set, only this code verifies, regardless of what was
        /// dispatched
        pub expected_code: Option<String>,
        /// Whether dispatched codes are echoed to the console
        pub console_output: bool,
    }

    impl Default for AuthApiConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                latency_ms: 100,
                expected_code: None,
                console_output: true,
            }
        }
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            Self {
                app: AppConfig::default(),
                auth_api: AuthApiConfig::default(),
            }
        }
    }
}

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Session store backing the handoff keys
    pub store: std::sync::Arc<storage::MemoryStore>,
    /// Auth API provider
    pub auth_api: std::sync::Arc<api::MockAuthApi>,
}

/// Initialize infrastructure services with async runtime
///
/// This function sets up:
/// - The in-memory session store
/// - The auth API provider from configuration
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let config = load_config()?;
    let store = std::sync::Arc::new(storage::MemoryStore::new());
    let auth_api = std::sync::Arc::new(api::create_auth_api(&config.auth_api));

    tracing::info!(
        provider = %config.auth_api.provider,
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices { store, auth_api })
}

/// Load infrastructure configuration from environment
fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let app = fa_shared::config::AppConfig::from_env();

    let latency_ms = match std::env::var("AUTH_API_LATENCY_MS") {
        Ok(raw) => raw.parse().map_err(|_| {
            InfrastructureError::Config(format!("Invalid AUTH_API_LATENCY_MS: {}", raw))
        })?,
        Err(_) => 100,
    };

    let auth_api = config::AuthApiConfig {
        provider: std::env::var("AUTH_API_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
        latency_ms,
        expected_code: std::env::var("AUTH_API_EXPECTED_CODE").ok(),
        console_output: std::env::var("AUTH_API_CONSOLE").map(|v| v != "0").unwrap_or(true),
    };

    Ok(config::InfrastructureConfig { app, auth_api })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Auth API error
    #[error("Auth API error: {0}")]
    Api(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

//! Mock Auth API Implementation
//!
//! A mock implementation of the verification and dispatch boundaries for
//! development and testing. Dispatched codes are logged to the console
//! instead of being sent anywhere, and verification checks submissions
//! against the last code dispatched to the target.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use fa_core::services::otp::{ResendServiceTrait, VerifyServiceTrait};
use fa_shared::utils::phone::{is_valid_phone, mask_phone_number};
use fa_shared::utils::validation::validators;

use crate::config::AuthApiConfig;

/// Number of digits in a dispatched code
const CODE_LENGTH: usize = 6;

/// Mock auth API for development and testing
///
/// This implementation:
/// - Generates and remembers a code per target
/// - Verifies submissions against the last dispatched code
/// - Logs dispatched codes to console
/// - Simulates round-trip latency and configurable failures
pub struct MockAuthApi {
    /// Last code dispatched to each target
    codes: RwLock<HashMap<String, String>>,
    /// When set, only this code verifies, regardless of dispatch history
    expected_code: Option<String>,
    /// Simulated round-trip latency in milliseconds
    latency_ms: u64,
    /// Whether to simulate failures (for testing)
    simulate_failure: AtomicBool,
    /// Whether to print dispatched codes to console
    console_output: bool,
    /// Counter for tracking number of dispatched codes
    dispatch_count: AtomicU64,
}

impl MockAuthApi {
    /// Create a new mock auth API with default behavior
    pub fn new() -> Self {
        Self::from_config(&AuthApiConfig::default())
    }

    /// Create a mock auth API from configuration
    pub fn from_config(config: &AuthApiConfig) -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
            expected_code: config.expected_code.clone(),
            latency_ms: config.latency_ms,
            simulate_failure: AtomicBool::new(false),
            console_output: config.console_output,
            dispatch_count: AtomicU64::new(0),
        }
    }

    /// Create a mock API with configurable options and no latency
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
            expected_code: None,
            latency_ms: 0,
            simulate_failure: AtomicBool::new(simulate_failure),
            console_output,
            dispatch_count: AtomicU64::new(0),
        }
    }

    /// Set the simulated round-trip latency
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Pin verification to a single known code
    pub fn with_expected_code(mut self, code: impl Into<String>) -> Self {
        self.expected_code = Some(code.into());
        self
    }

    /// Record a code as already dispatched to the target
    ///
    /// Models the initial dispatch the registration step performs before
    /// the verification flow opens.
    pub async fn seed_code(&self, target: &str, code: &str) {
        self.codes
            .write()
            .await
            .insert(target.to_string(), code.to_string());
    }

    /// The last code dispatched to the target, if any
    pub async fn last_code(&self, target: &str) -> Option<String> {
        self.codes.read().await.get(target).cloned()
    }

    /// Get the total number of codes dispatched
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }
    }

    fn failing(&self) -> bool {
        self.simulate_failure.load(Ordering::SeqCst)
    }
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerifyServiceTrait for MockAuthApi {
    async fn verify_code(&self, target: &str, code: &str) -> Result<bool, String> {
        if self.failing() {
            warn!(
                "Mock auth API simulating verification failure for target: {}",
                mask_phone_number(target)
            );
            return Err("Simulated verification failure".to_string());
        }

        self.simulate_latency().await;

        // Malformed submissions are rejections, not transport errors
        if !validators::is_numeric_code(code, CODE_LENGTH) {
            debug!(
                target: "auth_api",
                phone = %mask_phone_number(target),
                "Rejected malformed code"
            );
            return Ok(false);
        }

        if let Some(expected) = &self.expected_code {
            return Ok(constant_time_eq(expected.as_bytes(), code.as_bytes()));
        }

        let codes = self.codes.read().await;
        match codes.get(target) {
            Some(dispatched) => Ok(constant_time_eq(dispatched.as_bytes(), code.as_bytes())),
            None => {
                warn!(
                    target: "auth_api",
                    phone = %mask_phone_number(target),
                    "No code on record for target"
                );
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl ResendServiceTrait for MockAuthApi {
    async fn request_code(&self, target: &str) -> Result<String, String> {
        if !is_valid_phone(target) {
            return Err(format!(
                "Invalid target number format: {}",
                mask_phone_number(target)
            ));
        }

        if self.failing() {
            warn!(
                "Mock auth API simulating dispatch failure for target: {}",
                mask_phone_number(target)
            );
            return Err("Simulated dispatch failure".to_string());
        }

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.codes
            .write()
            .await
            .insert(target.to_string(), code.clone());

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.dispatch_count.fetch_add(1, Ordering::SeqCst) + 1;
        let masked = mask_phone_number(target);

        if self.console_output {
            // Console output for development - show the code
            println!("\n{}", "=".repeat(60));
            println!("📱 MOCK AUTH API - OTP #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked);
            println!("Message ID: {}", message_id);
            println!("Code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        // Structured logging for production
        info!(
            target: "auth_api",
            provider = "mock",
            phone = %masked,
            message_id = %message_id,
            "OTP dispatched successfully (mock)"
        );

        self.simulate_latency().await;

        Ok(message_id)
    }

    fn is_valid_target(&self, target: &str) -> bool {
        is_valid_phone(target)
    }
}

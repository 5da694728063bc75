//! Traits for verification, dispatch, and navigation integration

use async_trait::async_trait;

use crate::domain::entities::Session;

/// Trait for the verification endpoint
#[async_trait]
pub trait VerifyServiceTrait: Send + Sync {
    /// Check a candidate code against the target it was dispatched to
    ///
    /// `Ok(true)` means the code was accepted, `Ok(false)` that the server
    /// rejected it. `Err` is a transport or service failure; the flow treats
    /// it like a rejection in the user-facing message but reports it as an
    /// error to the programmatic caller.
    async fn verify_code(&self, target: &str, code: &str) -> Result<bool, String>;
}

/// Trait for the code dispatch endpoint
#[async_trait]
pub trait ResendServiceTrait: Send + Sync {
    /// Dispatch a fresh code to the target
    ///
    /// Returns the provider's message id on success.
    async fn request_code(&self, target: &str) -> Result<String, String>;

    /// Check if the dispatch target format is valid
    fn is_valid_target(&self, target: &str) -> bool;
}

/// Callbacks into the navigation layer
///
/// Implementations are plain synchronous hooks. The flow invokes
/// `verification_succeeded` exactly once per flow, after the session
/// handoff has finished and the flow has closed.
pub trait NavigatorTrait: Send + Sync {
    /// The code was accepted and the session handoff finished
    ///
    /// `session` is `None` only when the flow is configured to tolerate a
    /// missing staged registration.
    fn verification_succeeded(&self, session: Option<&Session>);

    /// The user asked to go back and edit the target number
    fn edit_target_requested(&self, target: &str);
}

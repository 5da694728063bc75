//! Main OTP flow service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing;

use fa_shared::utils::phone::mask_phone_number;

use crate::domain::entities::code_buffer::{CodeBuffer, CODE_LENGTH};
use crate::domain::entities::{ResendCountdown, Session};
use crate::errors::{DomainError, DomainResult, FlowError, SessionError};
use crate::repositories::store::SessionStore;
use crate::services::session::SessionService;

use super::config::OtpFlowConfig;
use super::ticker::CountdownTicker;
use super::traits::{NavigatorTrait, ResendServiceTrait, VerifyServiceTrait};
use super::types::{FlowSnapshot, RequestState, ResendOutcome, SubmitOutcome, VerificationRequest};

/// Mutable flow state shared with the countdown ticker
///
/// Every mutation happens under the one `RwLock` wrapping this struct, so
/// the ticker, the UI-facing editing calls, and the submit/resend paths
/// never observe a half-applied transition.
pub(super) struct FlowInner {
    /// The six-slot entry buffer
    pub(super) buffer: CodeBuffer,
    /// Cooldown gating the resend action
    pub(super) countdown: ResendCountdown,
    /// Lifecycle state of the verification request
    pub(super) request: RequestState,
    /// The attempt currently out at the verification endpoint, if any
    pub(super) in_flight: Option<VerificationRequest>,
    /// Inline error message for the form, newest wins
    pub(super) error: Option<String>,
    /// Set once the flow has ended; terminal
    pub(super) closed: bool,
}

impl FlowInner {
    fn new(cooldown_seconds: u32) -> Self {
        Self {
            buffer: CodeBuffer::new(),
            countdown: ResendCountdown::new(cooldown_seconds),
            request: RequestState::Idle,
            in_flight: None,
            error: None,
            closed: false,
        }
    }

    /// Edits are only accepted while the flow is open and idle
    fn is_editable(&self) -> bool {
        !self.closed && self.request == RequestState::Idle
    }
}

/// Service driving the OTP verification flow
///
/// Owns the entry buffer, the resend countdown, and the verification
/// request lifecycle for one dispatch target. A background ticker moves
/// the countdown once per second; it is cancelled as soon as the flow
/// closes, so no timer outlives the flow that spawned it.
pub struct OtpFlowService<V: VerifyServiceTrait, D: ResendServiceTrait, S: SessionStore, N: NavigatorTrait> {
    /// The number codes are dispatched to
    target: String,
    /// Verification endpoint
    verify_service: Arc<V>,
    /// Code dispatch endpoint
    resend_service: Arc<D>,
    /// Session staging and promotion
    sessions: Arc<SessionService<S>>,
    /// Navigation callbacks
    navigator: Arc<N>,
    /// Flow configuration
    config: OtpFlowConfig,
    /// State shared with the countdown ticker
    state: Arc<RwLock<FlowInner>>,
    /// Background countdown driver
    ticker: CountdownTicker,
}

impl<V: VerifyServiceTrait, D: ResendServiceTrait, S: SessionStore, N: NavigatorTrait>
    OtpFlowService<V, D, S, N>
{
    /// Create a flow for the given dispatch target and start its countdown
    ///
    /// The countdown starts at the configured cooldown, so the resend
    /// action opens up only after the initial code has had time to arrive.
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `target` - The number the initial code was dispatched to
    /// * `verify_service` - Verification endpoint implementation
    /// * `resend_service` - Code dispatch endpoint implementation
    /// * `sessions` - Session staging and promotion service
    /// * `navigator` - Navigation callback implementation
    /// * `config` - Flow configuration
    pub fn new(
        target: impl Into<String>,
        verify_service: Arc<V>,
        resend_service: Arc<D>,
        sessions: Arc<SessionService<S>>,
        navigator: Arc<N>,
        config: OtpFlowConfig,
    ) -> Self {
        let target = target.into();
        let state = Arc::new(RwLock::new(FlowInner::new(config.resend_cooldown_seconds)));
        let ticker = CountdownTicker::spawn(Arc::clone(&state));

        tracing::info!(
            target = %mask_phone_number(&target),
            cooldown_seconds = config.resend_cooldown_seconds,
            event = "otp_flow_started",
            "Verification flow started"
        );

        Self {
            target,
            verify_service,
            resend_service,
            sessions,
            navigator,
            config,
            state,
            ticker,
        }
    }

    /// Create a flow for the target staged by the registration step
    ///
    /// # Returns
    ///
    /// * `Ok(OtpFlowService)` - Flow bound to the staged target
    /// * `Err(DomainError)` - If no target is staged
    pub async fn from_pending(
        verify_service: Arc<V>,
        resend_service: Arc<D>,
        sessions: Arc<SessionService<S>>,
        navigator: Arc<N>,
        config: OtpFlowConfig,
    ) -> DomainResult<Self> {
        match sessions.pending_target().await? {
            Some(target) => Ok(Self::new(
                target,
                verify_service,
                resend_service,
                sessions,
                navigator,
                config,
            )),
            None => {
                tracing::warn!(
                    event = "pending_registration_missing",
                    "No staged target to verify against"
                );
                Err(SessionError::PendingRegistrationMissing.into())
            }
        }
    }

    /// The number codes are dispatched to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Write a single code slot from raw input
    ///
    /// Ignored while a submit is in flight or after the flow has closed.
    ///
    /// # Returns
    ///
    /// `true` if the input was accepted
    pub async fn set_digit(&self, index: usize, value: &str) -> bool {
        let mut inner = self.state.write().await;
        if !inner.is_editable() {
            return false;
        }
        inner.buffer.set_digit(index, value)
    }

    /// Handle a backspace keypress in the given slot
    ///
    /// Ignored while a submit is in flight or after the flow has closed.
    pub async fn backspace(&self, index: usize) -> bool {
        let mut inner = self.state.write().await;
        if !inner.is_editable() {
            return false;
        }
        inner.buffer.backspace(index)
    }

    /// Fill the buffer from pasted text
    ///
    /// # Returns
    ///
    /// The number of digits written; zero when the flow is not editable
    pub async fn paste(&self, text: &str) -> usize {
        let mut inner = self.state.write().await;
        if !inner.is_editable() {
            return 0;
        }
        inner.buffer.paste(text)
    }

    /// Empty every code slot
    pub async fn clear_code(&self) {
        let mut inner = self.state.write().await;
        if inner.is_editable() {
            inner.buffer.clear();
        }
    }

    /// Submit the entered code for verification
    ///
    /// This method:
    /// 1. Rejects an incomplete buffer without calling the endpoint
    /// 2. Captures the candidate code and moves the request to `Submitting`
    /// 3. Calls the verification endpoint exactly once, outside any lock
    /// 4. Applies the verdict, unless the flow closed while it was out
    ///
    /// On acceptance the staged registration is promoted to an active
    /// session, the flow closes, and the navigator is signalled. A rejected
    /// code or a transport failure returns the request to `Idle` with the
    /// entered digits intact.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitOutcome)` - What the submit did, including `Ignored`
    /// * `Err(DomainError)` - Closed flow, endpoint failure, or a session
    ///   handoff failure after an accepted code
    pub async fn submit(&self) -> DomainResult<SubmitOutcome> {
        let request = {
            let mut inner = self.state.write().await;

            if inner.closed || inner.request == RequestState::Verified {
                return Err(FlowError::FlowClosed.into());
            }
            if inner.request == RequestState::Submitting {
                tracing::debug!(
                    event = "otp_submit_ignored",
                    "Submit ignored: a request is already in flight"
                );
                return Ok(SubmitOutcome::Ignored);
            }
            if !inner.buffer.is_complete() {
                let error = FlowError::IncompleteCode {
                    filled: inner.buffer.filled_count(),
                    expected: CODE_LENGTH,
                };
                inner.error = Some(error.user_message().to_string());
                tracing::debug!(
                    filled = inner.buffer.filled_count(),
                    event = "otp_submit_incomplete",
                    "Submit rejected: buffer is incomplete"
                );
                return Ok(SubmitOutcome::Rejected(error));
            }

            let request = VerificationRequest::new(inner.buffer.as_string());
            inner.request = RequestState::Submitting;
            inner.in_flight = Some(request.clone());
            inner.error = None;

            tracing::info!(
                request_id = %request.id,
                target = %mask_phone_number(&self.target),
                event = "otp_submitted",
                "Verification request submitted"
            );
            request
        };

        let verdict = self
            .verify_service
            .verify_code(&self.target, &request.code)
            .await;

        match verdict {
            Ok(true) => self.handle_accepted(&request).await,
            Ok(false) => {
                let mut inner = self.state.write().await;
                inner.in_flight = None;
                if inner.closed {
                    return Ok(self.discard_verdict(&request));
                }
                inner.request = RequestState::Idle;
                let error = FlowError::CodeRejected;
                inner.error = Some(error.user_message().to_string());
                tracing::info!(
                    request_id = %request.id,
                    event = "otp_rejected",
                    "Verification request rejected"
                );
                Ok(SubmitOutcome::Rejected(error))
            }
            Err(message) => {
                let mut inner = self.state.write().await;
                inner.in_flight = None;
                if inner.closed {
                    return Ok(self.discard_verdict(&request));
                }
                inner.request = RequestState::Idle;
                let error = FlowError::VerifyUnavailable {
                    message: message.clone(),
                };
                inner.error = Some(error.user_message().to_string());
                tracing::error!(
                    request_id = %request.id,
                    error = %message,
                    event = "otp_verify_unavailable",
                    "Verification endpoint failed"
                );
                Err(error.into())
            }
        }
    }

    /// Apply an accepted verdict: promote the session, close, navigate
    async fn handle_accepted(&self, request: &VerificationRequest) -> DomainResult<SubmitOutcome> {
        {
            let mut inner = self.state.write().await;
            inner.in_flight = None;
            if inner.closed {
                return Ok(self.discard_verdict(request));
            }
            inner.request = RequestState::Verified;
        }

        let session = match self.promote_session().await {
            Ok(session) => session,
            Err(error) => {
                let mut inner = self.state.write().await;
                inner.request = RequestState::Idle;
                inner.error = Some(error.user_message().to_string());
                tracing::error!(
                    request_id = %request.id,
                    error = %error,
                    event = "session_promotion_failed",
                    "Code accepted but session handoff failed"
                );
                return Err(error);
            }
        };

        tracing::info!(
            request_id = %request.id,
            has_session = session.is_some(),
            event = "otp_verified",
            "Code accepted and session handed off"
        );

        // Close before signalling so the navigator never observes a live
        // flow for a finished verification.
        self.shutdown().await;
        self.navigator.verification_succeeded(session.as_ref());

        Ok(SubmitOutcome::Verified(session))
    }

    /// Promote the staged registration into the active session
    async fn promote_session(&self) -> DomainResult<Option<Session>> {
        match self.sessions.commit_registration().await {
            Ok(session) => Ok(Some(session)),
            Err(DomainError::Session(SessionError::PendingRegistrationMissing))
                if !self.config.require_pending_registration =>
            {
                tracing::warn!(
                    event = "pending_registration_missing",
                    "Code accepted with nothing staged; continuing without a session"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn discard_verdict(&self, request: &VerificationRequest) -> SubmitOutcome {
        tracing::info!(
            request_id = %request.id,
            event = "otp_result_discarded",
            "Flow closed while the request was out; verdict discarded"
        );
        SubmitOutcome::Ignored
    }

    /// Request a fresh code for the target
    ///
    /// Only acts when the cooldown has elapsed and no submit is in flight;
    /// otherwise nothing changes and the call reports `Ignored`. Acting
    /// clears the entry buffer and restarts the cooldown before the
    /// dispatch goes out, so the form is locked again even if the endpoint
    /// is slow. A dispatch failure reports an error but leaves the
    /// restarted cooldown counting.
    ///
    /// # Returns
    ///
    /// * `Ok(ResendOutcome)` - Dispatched or ignored
    /// * `Err(DomainError)` - Closed flow, invalid target, or dispatch failure
    pub async fn resend(&self) -> DomainResult<ResendOutcome> {
        if !self.resend_service.is_valid_target(&self.target) {
            return Err(DomainError::Validation {
                message: format!(
                    "Invalid dispatch target: {}",
                    mask_phone_number(&self.target)
                ),
            });
        }

        {
            let mut inner = self.state.write().await;

            if inner.closed {
                return Err(FlowError::FlowClosed.into());
            }
            if inner.request != RequestState::Idle {
                tracing::debug!(
                    event = "otp_resend_ignored",
                    reason = "request_in_flight",
                    "Resend ignored while a submit is in flight"
                );
                return Ok(ResendOutcome::Ignored);
            }
            if !inner.countdown.can_resend() {
                tracing::debug!(
                    seconds_remaining = inner.countdown.seconds_remaining(),
                    event = "otp_resend_ignored",
                    reason = "cooldown",
                    "Resend ignored while the cooldown is counting"
                );
                return Ok(ResendOutcome::Ignored);
            }

            inner.buffer.clear();
            inner.countdown.restart(self.config.resend_cooldown_seconds);
            inner.error = None;
        }

        match self.resend_service.request_code(&self.target).await {
            Ok(message_id) => {
                let inner = self.state.read().await;
                if inner.closed {
                    return Ok(ResendOutcome::Ignored);
                }
                tracing::info!(
                    target = %mask_phone_number(&self.target),
                    message_id = %message_id,
                    event = "otp_resend_requested",
                    "Fresh code dispatched"
                );
                Ok(ResendOutcome::Dispatched {
                    message_id,
                    next_resend_at: Utc::now()
                        + Duration::seconds(i64::from(self.config.resend_cooldown_seconds)),
                })
            }
            Err(message) => {
                let mut inner = self.state.write().await;
                if inner.closed {
                    return Ok(ResendOutcome::Ignored);
                }
                let error = FlowError::ResendFailed {
                    message: message.clone(),
                };
                inner.error = Some(error.user_message().to_string());
                tracing::error!(
                    target = %mask_phone_number(&self.target),
                    error = %message,
                    event = "otp_resend_failed",
                    "Code dispatch failed"
                );
                Err(error.into())
            }
        }
    }

    /// Leave the flow to go back and edit the target number
    ///
    /// Closes the flow and signals the navigator. A no-op on a flow that
    /// has already closed.
    pub async fn edit_target(&self) {
        if self.shutdown().await {
            tracing::info!(
                target = %mask_phone_number(&self.target),
                event = "otp_edit_target",
                "Leaving verification to edit the target"
            );
            self.navigator.edit_target_requested(&self.target);
        }
    }

    /// Close the flow
    ///
    /// Cancels the countdown ticker and marks the flow terminal. Verdicts
    /// arriving after this point are discarded. Idempotent.
    pub async fn close(&self) {
        self.shutdown().await;
    }

    /// Whether the flow has closed
    pub async fn is_closed(&self) -> bool {
        self.state.read().await.closed
    }

    /// A readable snapshot of the whole flow for rendering
    pub async fn snapshot(&self) -> FlowSnapshot {
        let inner = self.state.read().await;
        FlowSnapshot {
            target: self.target.clone(),
            slots: inner.buffer.slots(),
            focused_slot: inner.buffer.focused_slot(),
            is_complete: inner.buffer.is_complete(),
            seconds_until_resend: inner.countdown.seconds_remaining(),
            can_resend: inner.countdown.can_resend() && inner.is_editable(),
            countdown_display: inner.countdown.format_remaining(),
            request: inner.request,
            is_busy: inner.request == RequestState::Submitting,
            error: inner.error.clone(),
        }
    }

    /// Mark the flow closed and stop the ticker
    ///
    /// # Returns
    ///
    /// `true` if this call performed the transition
    async fn shutdown(&self) -> bool {
        {
            let mut inner = self.state.write().await;
            if inner.closed {
                return false;
            }
            inner.closed = true;
        }
        self.ticker.cancel();
        tracing::info!(
            target = %mask_phone_number(&self.target),
            event = "otp_flow_closed",
            "Verification flow closed"
        );
        true
    }
}

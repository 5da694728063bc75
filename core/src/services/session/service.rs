//! Main session handoff service implementation

use std::sync::Arc;
use tracing;

use fa_shared::utils::phone::mask_phone_number;
use fa_shared::utils::validation::{Validate, ValidationErrors};

use crate::domain::entities::{PendingRegistration, Session, UserRecord};
use crate::errors::{DomainError, DomainResult, SessionError};
use crate::repositories::store::{SessionStore, StoreOp};

/// Storage key for the staged registration record
pub const PENDING_USER_KEY: &str = "tempUser";

/// Storage key for the staged verification target
pub const PENDING_PHONE_KEY: &str = "tempPhone";

/// Storage key for the promoted account record
pub const SESSION_USER_KEY: &str = "user";

/// Storage key for the promoted auth token
pub const SESSION_TOKEN_KEY: &str = "token";

/// Session handoff service
///
/// Owns the four storage keys the client keeps account state under. The
/// register step stages a record under the temporary keys; a successful OTP
/// verification promotes it to the permanent pair and drops the staging
/// keys, all in one storage batch so the handoff can never be observed
/// half-done.
pub struct SessionService<S: SessionStore> {
    /// Client-side key-value storage
    store: Arc<S>,
}

impl<S: SessionStore> SessionService<S> {
    /// Create a new session service over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Stage a registration for OTP verification
    ///
    /// Validates the record, then writes it under `tempUser` (and the
    /// dispatch target under `tempPhone` when present) as one batch.
    ///
    /// # Arguments
    ///
    /// * `pending` - The registration to stage
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The registration was staged
    /// * `Err(DomainError)` - Validation or storage failure
    pub async fn stage_registration(&self, pending: &PendingRegistration) -> DomainResult<()> {
        pending.user.validate().map_err(|errors| DomainError::Validation {
            message: validation_summary(&errors),
        })?;

        let record = encode_record(&pending.user)?;
        let mut ops = vec![StoreOp::set(PENDING_USER_KEY, record)];
        if let Some(target) = &pending.target {
            ops.push(StoreOp::set(PENDING_PHONE_KEY, target.clone()));
        }
        self.store.apply(ops).await?;

        tracing::info!(
            target = %pending
                .target
                .as_deref()
                .map(mask_phone_number)
                .unwrap_or_else(|| "none".to_string()),
            event = "registration_staged",
            "Staged pending registration for verification"
        );
        Ok(())
    }

    /// Read the staged registration, if any
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PendingRegistration))` - A registration is staged
    /// * `Ok(None)` - Nothing staged
    /// * `Err(DomainError)` - Storage failure, or the staged record is not
    ///   valid JSON
    pub async fn pending_registration(&self) -> DomainResult<Option<PendingRegistration>> {
        let raw = match self.store.get(PENDING_USER_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let user = decode_record(&raw, PENDING_USER_KEY)?;
        let target = self.store.get(PENDING_PHONE_KEY).await?;
        Ok(Some(PendingRegistration { user, target }))
    }

    /// Read the staged dispatch target, if any
    pub async fn pending_target(&self) -> DomainResult<Option<String>> {
        self.store.get(PENDING_PHONE_KEY).await
    }

    /// Promote the staged registration into the permanent session
    ///
    /// This method:
    /// 1. Reads the staged record from `tempUser`
    /// 2. Writes the record to `user` and its token to `token`
    /// 3. Removes `tempUser` and `tempPhone`
    ///
    /// Steps 2 and 3 reach the store as a single atomic batch.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - The promoted session
    /// * `Err(DomainError)` - Nothing staged, the staged record is corrupt,
    ///   or the storage batch failed
    pub async fn commit_registration(&self) -> DomainResult<Session> {
        let pending = self
            .pending_registration()
            .await?
            .ok_or(SessionError::PendingRegistrationMissing)?;

        let record = encode_record(&pending.user)?;
        let session = Session::from_record(pending.user);
        self.store
            .apply(vec![
                StoreOp::set(SESSION_USER_KEY, record),
                StoreOp::set(SESSION_TOKEN_KEY, session.token.clone()),
                StoreOp::remove(PENDING_USER_KEY),
                StoreOp::remove(PENDING_PHONE_KEY),
            ])
            .await?;

        tracing::info!(
            event = "session_promoted",
            "Promoted staged registration into active session"
        );
        Ok(session)
    }

    /// Read the active session, if any
    ///
    /// Both halves of the promoted pair must be present; a record without a
    /// token (or the reverse) reads as signed out, matching the client's
    /// auth gate.
    pub async fn current_session(&self) -> DomainResult<Option<Session>> {
        let raw_user = self.store.get(SESSION_USER_KEY).await?;
        let token = self.store.get(SESSION_TOKEN_KEY).await?;
        match (raw_user, token) {
            (Some(raw), Some(token)) => {
                let user = decode_record(&raw, SESSION_USER_KEY)?;
                Ok(Some(Session::from_parts(user, token)))
            }
            _ => Ok(None),
        }
    }

    /// Whether an active session is present
    pub async fn is_authenticated(&self) -> DomainResult<bool> {
        Ok(self.current_session().await?.is_some())
    }

    /// Remove the active session (sign out)
    pub async fn clear_session(&self) -> DomainResult<()> {
        self.store
            .apply(vec![
                StoreOp::remove(SESSION_USER_KEY),
                StoreOp::remove(SESSION_TOKEN_KEY),
            ])
            .await?;

        tracing::info!(event = "session_cleared", "Cleared active session");
        Ok(())
    }

    /// Drop the staged registration without promoting it
    pub async fn discard_pending(&self) -> DomainResult<()> {
        self.store
            .apply(vec![
                StoreOp::remove(PENDING_USER_KEY),
                StoreOp::remove(PENDING_PHONE_KEY),
            ])
            .await?;

        tracing::info!(event = "pending_discarded", "Discarded staged registration");
        Ok(())
    }
}

fn encode_record(user: &UserRecord) -> DomainResult<String> {
    serde_json::to_string(user).map_err(|e| DomainError::Internal {
        message: format!("Failed to encode account record: {}", e),
    })
}

fn decode_record(raw: &str, key: &str) -> DomainResult<UserRecord> {
    serde_json::from_str(raw).map_err(|_| {
        SessionError::RecordCorrupted {
            key: key.to_string(),
        }
        .into()
    })
}

fn validation_summary(errors: &ValidationErrors) -> String {
    errors
        .errors()
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Pending registration entity staged between the register and OTP steps.

use super::user_record::UserRecord;

/// A registration waiting for OTP verification
///
/// The register step stages the new account's record plus the number the
/// code was sent to; the OTP step reads it back and, on success, promotes it
/// into the permanent session. In storage the two halves live under the
/// `tempUser` and `tempPhone` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    /// The account record awaiting promotion
    pub user: UserRecord,

    /// The number the verification code was dispatched to, when staged
    pub target: Option<String>,
}

impl PendingRegistration {
    /// Creates a pending registration without a staged target
    pub fn new(user: UserRecord) -> Self {
        Self { user, target: None }
    }

    /// Creates a pending registration with the dispatch target staged
    pub fn with_target(user: UserRecord, target: impl Into<String>) -> Self {
        Self {
            user,
            target: Some(target.into()),
        }
    }

    /// The token the promoted session will carry
    pub fn token(&self) -> &str {
        &self.user.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_registration_carries_token() {
        let pending =
            PendingRegistration::with_target(UserRecord::new("a@b.com", "t1"), "9876543210");
        assert_eq!(pending.token(), "t1");
        assert_eq!(pending.target.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_pending_registration_without_target() {
        let pending = PendingRegistration::new(UserRecord::new("a@b.com", "t1"));
        assert!(pending.target.is_none());
    }
}

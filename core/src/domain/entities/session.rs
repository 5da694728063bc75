//! Promoted session entity.

use serde::{Deserialize, Serialize};

use super::user_record::UserRecord;

/// The signed-in state the client keeps after a successful verification
///
/// Mirrors the promoted storage pair: the full record under `user` and the
/// bare token string under `token`. Both halves must be present for the
/// client to consider itself authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The promoted account record
    pub user: UserRecord,

    /// The auth token, extracted from the record at promotion time
    pub token: String,
}

impl Session {
    /// Builds a session from a record, extracting its token
    pub fn from_record(user: UserRecord) -> Self {
        let token = user.token.clone();
        Self { user, token }
    }

    /// Builds a session from the two storage halves
    pub fn from_parts(user: UserRecord, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }
}

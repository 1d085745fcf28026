//! Authentication response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Account;

/// Session token issued on login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Compact EdDSA-signed JWT.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// When the token stops being accepted.
    pub expires_at: Timestamp,
    /// The authenticated account.
    pub account: Account,
}

impl AuthToken {
    pub fn bearer(token: String, expires_at: Timestamp, account: Account) -> Self {
        Self {
            token,
            token_type: "Bearer".to_owned(),
            expires_at,
            account,
        }
    }
}

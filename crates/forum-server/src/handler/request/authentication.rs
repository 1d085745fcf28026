//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::validate_email;

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Email address of the account.
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl Login {
    /// Email as stored: trimmed and lowercased.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

//! Account response types.

use forum_postgres::model;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an account; never includes the password hash.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier of the account.
    pub account_id: Uuid,
    /// Public display name.
    pub nickname: String,
    /// Login email.
    pub email: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

impl Account {
    pub fn from_model(account: model::Account) -> Self {
        Self {
            account_id: account.id,
            nickname: account.nickname,
            email: account.email_address,
            created_at: account.created_at.into(),
            updated_at: account.updated_at.into(),
        }
    }
}

/// Confirmation returned after deleting an account.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDeleted {
    pub message: String,
}

impl Default for AccountDeleted {
    fn default() -> Self {
        Self {
            message: "Account deleted".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() -> anyhow::Result<()> {
        let now = Timestamp::now();
        let account = Account::from_model(model::Account {
            id: Uuid::new_v4(),
            nickname: "ana".to_owned(),
            email_address: "ana@example.com".to_owned(),
            password_hash: "$argon2id$secret".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        });

        let json = serde_json::to_value(&account)?;
        assert_eq!(json["email"], "ana@example.com");
        assert!(!json.to_string().contains("argon2id"));
        Ok(())
    }
}

//! Account request types.

use forum_postgres::model::NewAccount;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::{validate_email, validate_nickname};

/// Request payload to register an account.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    /// Public display name, 2 to 32 characters after trimming.
    #[validate(custom(function = "validate_nickname"))]
    pub nickname: String,

    /// Login email; stored trimmed and lowercased.
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    /// Plain-text password (8-128 characters), hashed before storage.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl CreateAccount {
    /// Normalized login email.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Converts the request into a database model with the given hash.
    pub fn into_model(self, password_hash: String) -> NewAccount {
        NewAccount {
            nickname: self.nickname.trim().to_owned(),
            email_address: self.normalized_email(),
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn request(nickname: &str, email: &str) -> CreateAccount {
        CreateAccount {
            nickname: nickname.to_owned(),
            email: email.to_owned(),
            password: "correct horse".to_owned(),
        }
    }

    #[test]
    fn padded_identity_passes_validation() {
        assert!(request(" Ana ", " ana@example.com ").validate().is_ok());
    }

    #[test]
    fn blank_nickname_fails_validation() {
        let errors = request("      ", "ana@example.com").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nickname"));
    }

    #[test]
    fn into_model_normalizes_identity() {
        let model = request(" Ana ", " Ana@Example.COM ").into_model("$argon2id$hash".to_owned());
        assert_eq!(model.nickname, "Ana");
        assert_eq!(model.email_address, "ana@example.com");
        assert_eq!(model.password_hash, "$argon2id$hash");
    }
}

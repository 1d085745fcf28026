use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author identity copied onto a post or comment when it is created.
///
/// The snapshot is a value, not a reference to the live account: later nickname
/// changes or account deletion leave existing posts and comments untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    /// Account identifier at the time of writing.
    pub user_id: Uuid,
    /// Display nickname at the time of writing.
    pub nickname: String,
    /// Email address at the time of writing.
    pub email: String,
}

impl AuthorSnapshot {
    /// Creates a new author snapshot.
    pub fn new(user_id: Uuid, nickname: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            nickname: nickname.into(),
            email: email.into(),
        }
    }

    /// Returns whether the snapshot was taken from the given account.
    #[inline]
    pub fn is_account(&self, account_id: Uuid) -> bool {
        self.user_id == account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_camel_case() {
        let id = Uuid::new_v4();
        let author = AuthorSnapshot::new(id, "ana", "ana@example.com");
        let json = serde_json::to_value(&author).unwrap();

        assert_eq!(json["userId"], id.to_string());
        assert_eq!(json["nickname"], "ana");
        assert_eq!(json["email"], "ana@example.com");
    }

    #[test]
    fn matches_only_its_own_account() {
        let id = Uuid::new_v4();
        let author = AuthorSnapshot::new(id, "ana", "ana@example.com");

        assert!(author.is_account(id));
        assert!(!author.is_account(Uuid::new_v4()));
    }
}

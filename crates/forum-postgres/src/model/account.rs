//! Account models.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Public display name.
    pub nickname: String,
    /// Login email, stored trimmed and lowercased.
    pub email_address: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new account.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Public display name.
    pub nickname: String,
    /// Login email; normalized on insert.
    pub email_address: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl Account {
    /// Returns the identity copied onto posts and comments written by this account.
    pub fn author_snapshot(&self) -> forum_core::AuthorSnapshot {
        forum_core::AuthorSnapshot::new(self.id, &self.nickname, &self.email_address)
    }
}

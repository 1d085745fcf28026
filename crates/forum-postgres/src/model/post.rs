//! Post models.

use diesel::prelude::*;
use forum_core::AuthorSnapshot;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::posts;

/// A forum post.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// Trimmed post body, 1 to 4000 characters.
    pub content: String,
    /// Author account at the time of writing.
    pub author_id: Uuid,
    /// Author nickname at the time of writing.
    pub author_nickname: String,
    /// Author email at the time of writing.
    pub author_email: String,
    /// Timestamp when the post was created.
    pub created_at: Timestamp,
}

/// Data for creating a new post.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    pub content: String,
    pub author_id: Uuid,
    pub author_nickname: String,
    pub author_email: String,
}

impl Post {
    /// Returns the author snapshot stored with the post.
    pub fn author(&self) -> AuthorSnapshot {
        AuthorSnapshot::new(self.author_id, &self.author_nickname, &self.author_email)
    }

    /// Returns whether the post was written by the given account.
    #[inline]
    pub fn is_authored_by(&self, account_id: Uuid) -> bool {
        self.author_id == account_id
    }
}

impl NewPost {
    /// Creates a new post written by `author`.
    pub fn new(content: impl Into<String>, author: AuthorSnapshot) -> Self {
        Self {
            content: content.into(),
            author_id: author.user_id,
            author_nickname: author.nickname,
            author_email: author.email,
        }
    }
}

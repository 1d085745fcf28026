//! Comment models.

use diesel::prelude::*;
use forum_core::{AuthorSnapshot, Threaded};
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::comments;

/// A comment on a post, optionally replying to another comment of the same post.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Owning post.
    pub post_id: Uuid,
    /// Comment this one replies to; `None` for a direct reply to the post.
    pub parent_id: Option<Uuid>,
    /// Trimmed comment body, 1 to 4000 characters.
    pub content: String,
    /// Author account at the time of writing.
    pub author_id: Uuid,
    /// Author nickname at the time of writing.
    pub author_nickname: String,
    /// Author email at the time of writing.
    pub author_email: String,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

/// Data for creating a new comment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewComment {
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub author_id: Uuid,
    pub author_nickname: String,
    pub author_email: String,
}

impl Comment {
    /// Returns the author snapshot stored with the comment.
    pub fn author(&self) -> AuthorSnapshot {
        AuthorSnapshot::new(self.author_id, &self.author_nickname, &self.author_email)
    }

    /// Returns whether the comment was written by the given account.
    #[inline]
    pub fn is_authored_by(&self, account_id: Uuid) -> bool {
        self.author_id == account_id
    }
}

impl Threaded for Comment {
    type Id = Uuid;

    #[inline]
    fn id(&self) -> &Uuid {
        &self.id
    }

    #[inline]
    fn post_id(&self) -> &Uuid {
        &self.post_id
    }

    #[inline]
    fn parent_id(&self) -> Option<&Uuid> {
        self.parent_id.as_ref()
    }
}

impl NewComment {
    /// Creates a new comment on `post_id` written by `author`.
    pub fn new(
        post_id: Uuid,
        parent_id: Option<Uuid>,
        content: impl Into<String>,
        author: AuthorSnapshot,
    ) -> Self {
        Self {
            post_id,
            parent_id,
            content: content.into(),
            author_id: author.user_id,
            author_nickname: author.nickname,
            author_email: author.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_copies_author_snapshot() {
        let author = AuthorSnapshot::new(Uuid::new_v4(), "ana", "ana@example.com");
        let comment = NewComment::new(Uuid::new_v4(), None, "hello", author.clone());

        assert_eq!(comment.author_id, author.user_id);
        assert_eq!(comment.author_nickname, "ana");
        assert_eq!(comment.author_email, "ana@example.com");
    }
}

//! Post response types.

use forum_core::{AuthorSnapshot, CommentNode};
use forum_postgres::model;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Comment;

/// A post with its author snapshot.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier of the post.
    pub post_id: Uuid,
    /// Post body.
    pub content: String,
    /// Author identity at the time of writing.
    pub author: AuthorSnapshot,
    /// Timestamp when the post was created.
    pub created_at: Timestamp,
}

impl Post {
    pub fn from_model(post: model::Post) -> Self {
        Self {
            post_id: post.id,
            author: post.author(),
            content: post.content,
            created_at: post.created_at.into(),
        }
    }
}

/// A post in the paginated list, with the number of comments on it.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(flatten)]
    pub post: Post,
    /// Number of comments at any depth.
    pub comments_count: i64,
}

/// A post with its comments arranged as a forest.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    pub post: Post,
    /// Top-level comments, each with nested replies.
    pub comments: Vec<CommentNode<Comment>>,
}

/// Confirmation returned after deleting a post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDeleted {
    /// Always `true` on success.
    pub ok: bool,
}

impl Default for PostDeleted {
    fn default() -> Self {
        Self { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_flattens_the_post() -> anyhow::Result<()> {
        let summary = PostSummary {
            post: Post {
                post_id: Uuid::new_v4(),
                content: "hello".to_owned(),
                author: AuthorSnapshot::new(Uuid::new_v4(), "ana", "ana@example.com"),
                created_at: Timestamp::now(),
            },
            comments_count: 3,
        };

        let json = serde_json::to_value(&summary)?;
        assert_eq!(json["content"], "hello");
        assert_eq!(json["commentsCount"], 3);
        assert_eq!(json["author"]["nickname"], "ana");
        Ok(())
    }
}

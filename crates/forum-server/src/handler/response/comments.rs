//! Comment response types.

use forum_core::{AuthorSnapshot, Threaded};
use forum_postgres::model;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment with its author snapshot.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier of the comment.
    pub comment_id: Uuid,
    /// Post the comment belongs to.
    pub post_id: Uuid,
    /// Comment this one replies to, if any.
    pub parent_id: Option<Uuid>,
    /// Comment body.
    pub content: String,
    /// Author identity at the time of writing.
    pub author: AuthorSnapshot,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

impl Comment {
    pub fn from_model(comment: model::Comment) -> Self {
        Self {
            comment_id: comment.id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            author: comment.author(),
            content: comment.content,
            created_at: comment.created_at.into(),
        }
    }
}

impl Threaded for Comment {
    type Id = Uuid;

    #[inline]
    fn id(&self) -> &Uuid {
        &self.comment_id
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

/// Result of deleting a comment together with its replies.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeleted {
    /// Always `true` on success.
    pub ok: bool,
    /// Number of comments actually removed.
    pub deleted: usize,
}

impl CommentDeleted {
    pub fn new(deleted: usize) -> Self {
        Self { ok: true, deleted }
    }
}

#[cfg(test)]
mod tests {
    use forum_core::build_tree;

    use super::*;

    fn comment(post_id: Uuid, parent_id: Option<Uuid>) -> Comment {
        Comment {
            comment_id: Uuid::now_v7(),
            post_id,
            parent_id,
            content: "reply".to_owned(),
            author: AuthorSnapshot::new(Uuid::new_v4(), "ana", "ana@example.com"),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn tree_serializes_with_nested_replies() -> anyhow::Result<()> {
        let post_id = Uuid::new_v4();
        let root = comment(post_id, None);
        let reply = comment(post_id, Some(root.comment_id));
        let expected_root = root.comment_id;

        let tree = build_tree(&post_id, vec![root, reply]);
        let json = serde_json::to_value(&tree)?;

        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["commentId"], expected_root.to_string());
        assert_eq!(json[0]["replies"][0]["parentId"], expected_root.to_string());
        assert_eq!(json[0]["replies"][0]["replies"].as_array().map(Vec::len), Some(0));
        Ok(())
    }
}

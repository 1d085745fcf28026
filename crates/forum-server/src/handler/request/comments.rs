//! Comment request types.

use forum_core::AuthorSnapshot;
use forum_postgres::model::NewComment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::validate_content;

/// Request payload to comment on a post or reply to a comment.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    /// Comment body, 1 to 4000 characters after trimming.
    #[validate(custom(function = "validate_content"))]
    pub content: String,

    /// Comment being replied to; it must belong to the same post.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

impl CreateComment {
    /// Converts the request into a database model on `post_id` written by `author`.
    pub fn into_model(self, post_id: Uuid, author: AuthorSnapshot) -> NewComment {
        NewComment::new(post_id, self.parent_id, self.content.trim(), author)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn parent_id_is_optional() -> anyhow::Result<()> {
        let request: CreateComment = serde_json::from_str(r#"{"content":"  hi  "}"#)?;
        assert!(request.validate().is_ok());
        assert_eq!(request.parent_id, None);

        let author = AuthorSnapshot::new(Uuid::new_v4(), "ana", "ana@example.com");
        let model = request.into_model(Uuid::new_v4(), author);
        assert_eq!(model.content, "hi");
        Ok(())
    }

    #[test]
    fn blank_content_is_rejected() -> anyhow::Result<()> {
        let parent_id = Uuid::new_v4();
        let body = format!(r#"{{"content":"   ","parentId":"{parent_id}"}}"#);
        let request: CreateComment = serde_json::from_str(&body)?;

        assert_eq!(request.parent_id, Some(parent_id));
        assert!(request.validate().is_err());
        Ok(())
    }
}

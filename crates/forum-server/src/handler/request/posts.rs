//! Post request types.

use forum_core::AuthorSnapshot;
use forum_postgres::model::NewPost;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::validate_content;

/// Request payload to create a post.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    /// Post body, 1 to 4000 characters after trimming.
    #[validate(custom(function = "validate_content"))]
    pub content: String,
}

impl CreatePost {
    /// Converts the request into a database model written by `author`.
    pub fn into_model(self, author: AuthorSnapshot) -> NewPost {
        NewPost::new(self.content.trim(), author)
    }
}

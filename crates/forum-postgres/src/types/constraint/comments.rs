use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Comments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum CommentConstraints {
    #[strum(serialize = "comments_content_length")]
    ContentLength,
    #[strum(serialize = "comments_content_trimmed")]
    ContentTrimmed,
    #[strum(serialize = "comments_parent_not_self")]
    ParentNotSelf,

    // The post was deleted while the comment was being written.
    #[strum(serialize = "comments_post_id_fkey")]
    PostReference,
}

impl CommentConstraints {
    /// Creates a new [`CommentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            CommentConstraints::ContentLength
            | CommentConstraints::ContentTrimmed
            | CommentConstraints::ParentNotSelf => ConstraintCategory::Validation,

            CommentConstraints::PostReference => ConstraintCategory::Reference,
        }
    }
}

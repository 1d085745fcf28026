use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Posts table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum PostConstraints {
    #[strum(serialize = "posts_content_length")]
    ContentLength,
    #[strum(serialize = "posts_content_trimmed")]
    ContentTrimmed,
}

impl PostConstraints {
    /// Creates a new [`PostConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

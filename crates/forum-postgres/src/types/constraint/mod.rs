//! Database constraint violations organized by table.

mod accounts;
mod comments;
mod posts;

use std::fmt;

pub use accounts::AccountConstraints;
pub use comments::CommentConstraints;
pub use posts::PostConstraints;
use serde::{Deserialize, Serialize};

/// Any named constraint of the forum schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    Post(PostConstraints),
    Comment(CommentConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Format, length and range checks.
    Validation,
    /// Timestamp ordering checks.
    Chronological,
    /// References to rows that must exist.
    Reference,
    /// Primary keys and unique indexes.
    Uniqueness,
}

impl ConstraintViolation {
    /// Parses a constraint name reported by PostgreSQL.
    ///
    /// ```
    /// use forum_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("accounts_email_address_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if constraint.starts_with("accounts_") {
            AccountConstraints::new(constraint).map(Self::Account)
        } else if constraint.starts_with("posts_") {
            PostConstraints::new(constraint).map(Self::Post)
        } else if constraint.starts_with("comments_") {
            CommentConstraints::new(constraint).map(Self::Comment)
        } else {
            None
        }
    }

    /// Returns the table the constraint belongs to.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Account(_) => "accounts",
            Self::Post(_) => "posts",
            Self::Comment(_) => "comments",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::Account(c) => c.categorize(),
            Self::Post(c) => c.categorize(),
            Self::Comment(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(c) => write!(f, "{c}"),
            Self::Post(c) => write!(f, "{c}"),
            Self::Comment(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("accounts_email_address_unique_idx"),
            Some(ConstraintViolation::Account(
                AccountConstraints::EmailAddressUnique
            ))
        );
        assert_eq!(
            ConstraintViolation::new("posts_content_length"),
            Some(ConstraintViolation::Post(PostConstraints::ContentLength))
        );
        assert_eq!(
            ConstraintViolation::new("comments_post_id_fkey"),
            Some(ConstraintViolation::Comment(CommentConstraints::PostReference))
        );
    }

    #[test]
    fn rejects_unknown_constraints() {
        assert_eq!(ConstraintViolation::new("accounts_nonexistent"), None);
        assert_eq!(ConstraintViolation::new("sessions_token_unique"), None);
    }

    #[test]
    fn categorizes_violations() {
        let unique = ConstraintViolation::new("accounts_email_address_unique_idx");
        assert_eq!(
            unique.map(|c| c.categorize()),
            Some(ConstraintCategory::Uniqueness)
        );

        let reference = ConstraintViolation::new("comments_post_id_fkey");
        assert_eq!(
            reference.map(|c| c.categorize()),
            Some(ConstraintCategory::Reference)
        );
    }

    #[test]
    fn serializes_as_constraint_name() {
        let violation = ConstraintViolation::Comment(CommentConstraints::ContentLength);
        let json = serde_json::to_string(&violation).unwrap();
        assert_eq!(json, "\"comments_content_length\"");
        assert_eq!(violation.table_name(), "comments");
    }
}

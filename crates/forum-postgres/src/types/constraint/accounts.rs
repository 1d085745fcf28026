use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Accounts table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum AccountConstraints {
    #[strum(serialize = "accounts_nickname_length")]
    NicknameLength,
    #[strum(serialize = "accounts_email_format")]
    EmailFormat,
    #[strum(serialize = "accounts_email_normalized")]
    EmailNormalized,
    #[strum(serialize = "accounts_email_length_max")]
    EmailLengthMax,
    #[strum(serialize = "accounts_password_hash_not_empty")]
    PasswordHashNotEmpty,

    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "accounts_email_address_unique_idx")]
    EmailAddressUnique,
}

impl AccountConstraints {
    /// Creates a new [`AccountConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AccountConstraints::NicknameLength
            | AccountConstraints::EmailFormat
            | AccountConstraints::EmailNormalized
            | AccountConstraints::EmailLengthMax
            | AccountConstraints::PasswordHashNotEmpty => ConstraintCategory::Validation,

            AccountConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,

            AccountConstraints::EmailAddressUnique => ConstraintCategory::Uniqueness,
        }
    }
}

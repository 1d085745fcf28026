//! Account constraint violations.

use forum_postgres::types::AccountConstraints;

use crate::handler::{Error, ErrorKind};

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::NicknameLength => {
                ErrorKind::BadRequest.with_message("Nickname must be between 2 and 32 characters")
            }
            AccountConstraints::EmailFormat => {
                ErrorKind::BadRequest.with_message("Invalid email format")
            }
            AccountConstraints::EmailNormalized => ErrorKind::BadRequest
                .with_message("Email address must be lowercase without surrounding whitespace"),
            AccountConstraints::EmailLengthMax => {
                ErrorKind::BadRequest.with_message("Email address is too long")
            }
            AccountConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_message("Password cannot be empty")
            }
            AccountConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
            AccountConstraints::EmailAddressUnique => ErrorKind::Conflict
                .with_message("An account with this email address already exists"),
        };

        error.with_resource("account")
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_constraint_maps_to_an_account_error() {
        for constraint in AccountConstraints::iter() {
            let error: Error = constraint.into();
            assert_eq!(error.resource(), Some("account"));
        }
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let error: Error = AccountConstraints::EmailAddressUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }
}

//! Shared validation helpers.

use validator::{ValidateEmail, ValidationError};

/// Longest accepted post or comment body, in characters.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Longest accepted email address, in characters.
pub const MAX_EMAIL_CHARS: usize = 254;

/// Builds a validation error with a user-facing message.
pub fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Post and comment bodies must hold 1 to 4000 characters once trimmed.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    let chars = content.trim().chars().count();

    if chars == 0 {
        return Err(validation_error("content_blank", "must not be blank"));
    }

    if chars > MAX_CONTENT_CHARS {
        return Err(validation_error(
            "content_length",
            "must be at most 4000 characters long",
        ));
    }

    Ok(())
}

/// Nicknames must hold 2 to 32 characters once trimmed.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let chars = nickname.trim().chars().count();

    if !(2..=32).contains(&chars) {
        return Err(validation_error(
            "nickname_length",
            "must be between 2 and 32 characters long",
        ));
    }

    Ok(())
}

/// Emails are checked as stored, so surrounding whitespace is ignored.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(validation_error(
            "email_length",
            "must be at most 254 characters long",
        ));
    }

    if !email.validate_email() {
        return Err(validation_error("email", "must be a valid email address"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_content_is_blank() {
        let error = validate_content(" \n\t ").unwrap_err();
        assert_eq!(error.code, "content_blank");
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let padded = format!("  {}  ", "a".repeat(MAX_CONTENT_CHARS));
        assert!(validate_content(&padded).is_ok());

        let too_long = "é".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(validate_content(&too_long).unwrap_err().code, "content_length");
    }

    #[test]
    fn nickname_length_ignores_padding() {
        assert!(validate_nickname("  Ana  ").is_ok());
        assert_eq!(validate_nickname("    ").unwrap_err().code, "nickname_length");
        assert_eq!(validate_nickname(" a ").unwrap_err().code, "nickname_length");
        assert!(validate_nickname(&"n".repeat(33)).is_err());
    }

    #[test]
    fn email_is_checked_after_trimming() {
        assert!(validate_email(" ana@example.com ").is_ok());
        assert_eq!(validate_email("  ").unwrap_err().code, "email");
        assert_eq!(validate_email("not-an-email").unwrap_err().code, "email");

        let long = format!("{}@example.com", "a".repeat(MAX_EMAIL_CHARS));
        assert_eq!(validate_email(&long).unwrap_err().code, "email_length");
    }
}

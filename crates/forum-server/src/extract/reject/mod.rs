//! Drop-in replacements for the axum body, path and query extractors.
//!
//! Each one rejects with a [`handler::Error`], so a malformed request gets the
//! same JSON error body as every other failure.
//!
//! [`handler::Error`]: crate::handler::Error

mod json;
mod path;
mod query;
mod validated_json;

pub use self::json::Json;
pub use self::path::Path;
pub use self::query::Query;
pub use self::validated_json::ValidateJson;

/// Keeps at most three lines and 200 characters of an upstream error message.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_error_message;

    #[test]
    fn sanitize_truncates_long_messages() {
        let message = format!("first\nsecond\nthird\nfourth {}", "x".repeat(300));
        let sanitized = sanitize_error_message(&message);

        assert!(sanitized.starts_with("first second third"));
        assert!(!sanitized.contains("fourth"));
        assert!(sanitized.chars().count() <= 200);
    }
}

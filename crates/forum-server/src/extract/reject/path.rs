use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Path parameter extractor that rejects with a [`handler::Error`].
///
/// [`handler::Error`]: crate::handler::Error
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let message = err.body_text();
                ErrorKind::BadRequest
                    .with_message("Invalid path parameter")
                    .with_context(format!(
                        "{}. {}",
                        sanitize_error_message(&message),
                        describe_expected_format(&message)
                    ))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(sanitize_error_message(&err.body_text())),
            other => ErrorKind::InternalServerError
                .with_message("Path processing failed")
                .with_context(sanitize_error_message(&other.body_text())),
        }
    }
}

fn describe_expected_format(message: &str) -> &'static str {
    let message = message.to_lowercase();

    if message.contains("uuid") || message.contains("invalid character") {
        "Identifiers must be UUIDs such as 0190b6a2-4c1e-7f3a-9d52-7c3e1a2b4c5d"
    } else if message.contains("invalid digit") {
        "Numeric parameters must contain only digits"
    } else {
        "Check that the parameter matches the expected type"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_failures_explain_the_format() {
        let hint = describe_expected_format("UUID parsing failed: invalid character");
        assert!(hint.starts_with("Identifiers must be UUIDs"));
    }

    #[test]
    fn unknown_failures_get_a_generic_hint() {
        let hint = describe_expected_format("something else");
        assert_eq!(hint, "Check that the parameter matches the expected type");
    }
}

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Tracing target for query string parsing.
const TRACING_TARGET: &str = "forum_server::extract::query";

/// Query string extractor that rejects with a [`handler::Error`].
///
/// [`handler::Error`]: crate::handler::Error
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Self(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

fn enhance_query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "query string parsing failed",
    );

    let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
        return ErrorKind::BadRequest.with_message("Invalid query parameters");
    };

    let message = err.body_text();
    let field = extract_field_name(&message).unwrap_or("unknown");

    if message.contains("missing field") {
        ErrorKind::BadRequest
            .with_message("Missing required query parameter")
            .with_context(format!("The query parameter '{field}' is required"))
    } else if message.contains("duplicate field") {
        ErrorKind::BadRequest
            .with_message("Duplicate query parameter")
            .with_context(format!("The query parameter '{field}' was given more than once"))
    } else {
        ErrorKind::BadRequest
            .with_message("Invalid query parameters")
            .with_context(sanitize_error_message(&message))
    }
}

/// Pulls the first backtick-quoted name out of a serde error message.
fn extract_field_name(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let end = message[start..].find('`')?;
    Some(&message[start..start + end])
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::handler::request::PageParams;

    #[test]
    fn extracts_backtick_quoted_field() {
        assert_eq!(extract_field_name("missing field `page`"), Some("page"));
        assert_eq!(extract_field_name("no field here"), None);
    }

    #[tokio::test]
    async fn non_numeric_page_is_a_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/posts?page=abc")
            .body(())
            .expect("valid request")
            .into_parts();

        let error = <Query<PageParams> as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .expect_err("page must be numeric");
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Invalid query parameters"));
    }
}

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "forum_server::extract::validate";

/// JSON body extractor that also runs [`Validate`] on the payload.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

fn bound(params: &HashMap<Cow<'static, str>, serde_json::Value>, key: &str) -> Option<u64> {
    params.get(key).and_then(serde_json::Value::as_u64)
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "required" => format!("Field '{field}' is required"),
        "email" => format!("Field '{field}' must be a valid email address"),
        "length" => match (bound(&error.params, "min"), bound(&error.params, "max")) {
            (Some(min), Some(max)) => {
                format!("Field '{field}' must be between {min} and {max} characters long")
            }
            (Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
            (None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
            (None, None) => format!("Field '{field}' has an invalid length"),
        },
        "range" => match (bound(&error.params, "min"), bound(&error.params, "max")) {
            (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
            _ => format!("Field '{field}' is out of range"),
        },
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        // Field order in the map is unspecified.
        messages.sort();

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "request validation failed",
        );

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Registration {
        #[validate(length(min = 2, max = 32))]
        nickname: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn reports_every_failing_field() {
        let registration = Registration {
            nickname: "a".to_owned(),
            email: "not-an-email".to_owned(),
        };

        let error: Error<'static> = registration.validate().unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(
            error.message(),
            Some(
                "Field 'email' must be a valid email address. \
                 Field 'nickname' must be between 2 and 32 characters long"
            )
        );
    }

    #[test]
    fn custom_messages_take_precedence() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "content",
            ValidationError::new("blank").with_message("must not be blank".into()),
        );

        let error: Error<'static> = errors.into();
        assert_eq!(error.message(), Some("Field 'content': must not be blank"));
    }
}

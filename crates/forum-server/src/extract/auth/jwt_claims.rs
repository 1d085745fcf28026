use std::time::Duration;

use forum_core::AuthorSnapshot;
use forum_postgres::model::Account;
use jiff::Timestamp;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// Claims carried by a session token.
///
/// Registered claims identify the issuer, the audience and the account
/// (`sub`); the private claims copy the nickname and email so handlers can
/// stamp an author snapshot without another query.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    /// Unique token identifier.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Account the token was issued to.
    #[serde(rename = "sub")]
    pub account_id: Uuid,

    /// Issue time in unix seconds.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry time in unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Account nickname at login time.
    #[serde(rename = "nck")]
    pub nickname: String,
    /// Account email at login time.
    #[serde(rename = "eml")]
    pub email: String,
}

impl AuthClaims {
    const JWT_AUDIENCE: &str = "forum:server";
    const JWT_ISSUER: &str = "forum";

    /// Creates claims for `account` that expire after `ttl`.
    pub fn new(account: &Account, ttl: Duration) -> Self {
        let issued_at = Timestamp::now().as_second();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            account_id: account.id,
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
            nickname: account.nickname.clone(),
            email: account.email_address.clone(),
        }
    }

    /// Returns the identity stamped onto posts and comments by this caller.
    pub fn author_snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot::new(self.account_id, &self.nickname, &self.email)
    }

    /// Returns the expiry as a timestamp.
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_second(self.expires_at).unwrap_or(Timestamp::MAX)
    }

    /// Returns whether the token has expired.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }

    /// Verifies and decodes a compact JWT.
    pub fn from_token(token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "jti", "sub", "iat", "exp"]);

        let claims = decode::<Self>(token, decoding_key, &validation)?.claims;

        // The library allows some leeway on `exp`.
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                account_id = %claims.account_id,
                expired_at = %claims.expires_at(),
                "token rejected: expired",
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_id = %claims.token_id,
            account_id = %claims.account_id,
            "token verified",
        );

        Ok(claims)
    }

    /// Signs the claims into a compact JWT.
    pub fn into_token(&self, encoding_key: &EncodingKey) -> Result<String> {
        encode(&Header::new(Algorithm::EdDSA), self, encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %self.account_id,
                "failed to encode token",
            );
            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_context("Unable to create session token")
        })
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed"),
            JwtErrorKind::InvalidAudience | JwtErrorKind::InvalidIssuer => {
                ErrorKind::Unauthorized
                    .with_message("Authentication token was not issued by this service")
            }
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_context(format!("Token is missing the '{claim}' claim")),
            JwtErrorKind::InvalidToken
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_) => ErrorKind::MalformedAuthToken.into_error(),
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context("An unexpected error occurred during token validation"),
        }
    }
}

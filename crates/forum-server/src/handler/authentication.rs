//! Login endpoint.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use forum_postgres::PgClient;
use forum_postgres::query::AccountRepository;

use crate::extract::{AuthClaims, Json, ValidateJson};
use crate::handler::request::Login;
use crate::handler::response::{Account, AuthToken};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication endpoints.
const TRACING_TARGET: &str = "forum_server::handler::authentication";

/// Verifies credentials and issues a session token.
///
/// Unknown emails still pay for one password verification, so response time
/// does not reveal whether an account exists.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    let mut conn = pg_client.get_connection().await?;
    let email = request.normalized_email();

    let Some(account) = conn.find_account_by_email(&email).await? else {
        password_hasher.verify_dummy_password(&request.password);
        tracing::warn!(target: TRACING_TARGET, "login failed: unknown email");
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid email or password")
            .with_resource("authentication"));
    };

    password_hasher
        .verify_password(&request.password, &account.password_hash)
        .inspect_err(|_| {
            tracing::warn!(
                target: TRACING_TARGET,
                account_id = %account.id,
                "login failed: wrong password",
            );
        })?;

    let claims = AuthClaims::new(&account, session_keys.token_ttl());
    let token = claims.into_token(session_keys.encoding_key())?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        token_id = %claims.token_id,
        "session token issued",
    );

    let response = AuthToken::bearer(token, claims.expires_at(), Account::from_model(account));
    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/auth/login", post(login))
}

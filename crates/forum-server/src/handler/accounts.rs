//! Account registration, lookup and deletion.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use forum_postgres::PgClient;
use forum_postgres::query::AccountRepository;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{AccountPathParams, CreateAccount, PageParams};
use crate::handler::response::{Account, AccountDeleted, Page};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState};

/// Tracing target for account endpoints.
const TRACING_TARGET: &str = "forum_server::handler::accounts";

#[tracing::instrument(skip_all)]
async fn create_account(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<CreateAccount>,
) -> Result<(StatusCode, Json<Account>)> {
    let mut conn = pg_client.get_connection().await?;

    if conn.email_exists(&request.normalized_email()).await? {
        tracing::debug!(target: TRACING_TARGET, "registration rejected: email taken");
        return Err(ErrorKind::Conflict
            .with_message("An account with this email already exists")
            .with_resource("account"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    // A concurrent registration still hits the unique constraint.
    let account = conn
        .create_account(request.into_model(password_hash))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "account created",
    );

    Ok((StatusCode::CREATED, Json(Account::from_model(account))))
}

#[tracing::instrument(skip_all)]
async fn list_accounts(
    State(pg_client): State<PgClient>,
    Query(params): Query<PageParams>,
) -> Result<(StatusCode, Json<Page<Account>>)> {
    let mut conn = pg_client.get_connection().await?;

    let total = conn.count_accounts().await?;
    let accounts = conn.list_accounts(params.to_pagination()).await?;
    let data = accounts.into_iter().map(Account::from_model).collect();

    let page = Page::new(params.page(), params.limit(), total, data);
    Ok((StatusCode::OK, Json(page)))
}

#[tracing::instrument(skip_all)]
async fn read_account(
    State(pg_client): State<PgClient>,
    Path(path_params): Path<AccountPathParams>,
) -> Result<(StatusCode, Json<Account>)> {
    let mut conn = pg_client.get_connection().await?;

    let Some(account) = conn.find_account_by_email(&path_params.email).await? else {
        return Err(ErrorKind::NotFound
            .with_message("No account exists with this email")
            .with_resource("account"));
    };

    Ok((StatusCode::OK, Json(Account::from_model(account))))
}

#[tracing::instrument(
    skip_all,
    fields(account_id = %auth_claims.account_id)
)]
async fn delete_account(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<AccountPathParams>,
) -> Result<(StatusCode, Json<AccountDeleted>)> {
    let mut conn = pg_client.get_connection().await?;

    let Some(account) = conn.find_account_by_email(&path_params.email).await? else {
        return Err(ErrorKind::NotFound
            .with_message("No account exists with this email")
            .with_resource("account"));
    };

    if account.id != auth_claims.account_id {
        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            target_account_id = %account.id,
            "account deletion denied: not the owner",
        );
        return Err(ErrorKind::Forbidden
            .with_message("You can only delete your own account")
            .with_resource("account"));
    }

    if !conn.delete_account(account.id).await? {
        return Err(ErrorKind::NotFound
            .with_message("No account exists with this email")
            .with_resource("account"));
    }

    tracing::info!(target: TRACING_TARGET, "account deleted");
    Ok((StatusCode::OK, Json(AccountDeleted::default())))
}

/// Routes that work without a session.
pub fn public_routes() -> Router<ServiceState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{email}", get(read_account))
}

/// Routes that require a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new().route("/accounts/{email}", delete(delete_account))
}

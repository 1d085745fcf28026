//! Post creation, listing, reading and deletion.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use forum_core::build_tree;
use forum_postgres::query::{CommentRepository, PostRepository};
use forum_postgres::{PgClient, model};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{CreatePost, PageParams, PostPathParams};
use crate::handler::response::{Comment, Page, Post, PostDeleted, PostSummary, PostWithComments};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for post endpoints.
const TRACING_TARGET: &str = "forum_server::handler::posts";

fn post_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Post not found")
        .with_resource("post")
}

fn ensure_author(post: &model::Post, account_id: Uuid) -> Result<()> {
    if post.is_authored_by(account_id) {
        return Ok(());
    }

    tracing::warn!(
        target: TRACING_TARGET_AUTHORIZATION,
        author_id = %post.author_id,
        "post deletion denied: not the author",
    );
    Err(ErrorKind::Forbidden
        .with_message("Only the author can delete this post")
        .with_resource("post"))
}

#[tracing::instrument(
    skip_all,
    fields(account_id = %auth_claims.account_id)
)]
async fn create_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<CreatePost>,
) -> Result<(StatusCode, Json<Post>)> {
    let mut conn = pg_client.get_connection().await?;
    let post = conn
        .create_post(request.into_model(auth_claims.author_snapshot()))
        .await?;

    tracing::info!(target: TRACING_TARGET, post_id = %post.id, "post created");
    Ok((StatusCode::CREATED, Json(Post::from_model(post))))
}

#[tracing::instrument(skip_all)]
async fn list_posts(
    State(pg_client): State<PgClient>,
    Query(params): Query<PageParams>,
) -> Result<(StatusCode, Json<Page<PostSummary>>)> {
    let mut conn = pg_client.get_connection().await?;

    let total = conn.count_posts().await?;
    let posts = conn.list_posts(params.to_pagination()).await?;
    let post_ids: Vec<_> = posts.iter().map(|post| post.id).collect();
    let counts = conn.count_comments_by_posts(&post_ids).await?;

    let data = posts
        .into_iter()
        .map(|post| PostSummary {
            comments_count: counts.get(&post.id).copied().unwrap_or(0),
            post: Post::from_model(post),
        })
        .collect();

    let page = Page::new(params.page(), params.limit(), total, data);
    Ok((StatusCode::OK, Json(page)))
}

#[tracing::instrument(
    skip_all,
    fields(post_id = %path_params.post_id)
)]
async fn read_post(
    State(pg_client): State<PgClient>,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostWithComments>)> {
    let mut conn = pg_client.get_connection().await?;

    let post = conn
        .find_post_by_id(path_params.post_id)
        .await?
        .ok_or_else(post_not_found)?;

    let comments = conn
        .find_comments_by_post(post.id)
        .await?
        .into_iter()
        .map(Comment::from_model)
        .collect();

    let tree = build_tree(&post.id, comments);
    tracing::debug!(
        target: TRACING_TARGET,
        roots = tree.len(),
        total_comments = tree.iter().map(|node| node.len()).sum::<usize>(),
        "thread assembled"
    );

    let response = PostWithComments {
        comments: tree,
        post: Post::from_model(post),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_claims.account_id,
        post_id = %path_params.post_id,
    )
)]
async fn delete_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostDeleted>)> {
    let mut conn = pg_client.get_connection().await?;

    let post = conn
        .find_post_by_id(path_params.post_id)
        .await?
        .ok_or_else(post_not_found)?;

    ensure_author(&post, auth_claims.account_id)?;

    let deleted_comments = conn
        .delete_post_with_comments(post.id)
        .await?
        .ok_or_else(post_not_found)?;

    tracing::info!(
        target: TRACING_TARGET,
        deleted_comments,
        "post deleted",
    );

    Ok((StatusCode::OK, Json(PostDeleted::default())))
}

/// Routes that work without a session.
pub fn public_routes() -> Router<ServiceState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{postId}", get(read_post))
}

/// Routes that require a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/{postId}", delete(delete_post))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author_id: Uuid) -> model::Post {
        model::Post {
            id: Uuid::now_v7(),
            content: "hello".to_owned(),
            author_id,
            author_nickname: "ana".to_owned(),
            author_email: "ana@example.com".to_owned(),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn author_may_delete_own_post() {
        let author_id = Uuid::new_v4();
        assert!(ensure_author(&post(author_id), author_id).is_ok());
    }

    #[test]
    fn other_accounts_are_forbidden() {
        let error = ensure_author(&post(Uuid::new_v4()), Uuid::new_v4()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert_eq!(error.resource(), Some("post"));
    }
}

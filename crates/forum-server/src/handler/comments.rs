//! Commenting on posts and deleting comment threads.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, post};
use forum_core::collect_descendants;
use forum_postgres::query::{CommentRepository, PostRepository};
use forum_postgres::{PgClient, model};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::request::{CommentPathParams, CreateComment, PostPathParams};
use crate::handler::response::{Comment, CommentDeleted};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for comment endpoints.
const TRACING_TARGET: &str = "forum_server::handler::comments";

/// A reply must point at an existing comment of the same post.
fn check_parent(parent: Option<&model::Comment>, post_id: Uuid) -> Result<()> {
    if parent.is_some_and(|parent| parent.post_id == post_id) {
        return Ok(());
    }

    Err(ErrorKind::BadRequest
        .with_message("Invalid parentId")
        .with_context("The parent comment must exist on the same post")
        .with_resource("comment"))
}

fn ensure_author(comment: &model::Comment, account_id: Uuid) -> Result<()> {
    if comment.is_authored_by(account_id) {
        return Ok(());
    }

    tracing::warn!(
        target: TRACING_TARGET_AUTHORIZATION,
        author_id = %comment.author_id,
        "comment deletion denied: not the author",
    );
    Err(ErrorKind::Forbidden
        .with_message("Only the author can delete this comment")
        .with_resource("comment"))
}

/// Ids of `comment` and every reply below it within `thread`.
fn thread_ids(comment: &model::Comment, thread: &[model::Comment]) -> Vec<Uuid> {
    collect_descendants(&comment.id, thread).into_iter().collect()
}

#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_claims.account_id,
        post_id = %path_params.post_id,
    )
)]
async fn create_comment(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
    ValidateJson(request): ValidateJson<CreateComment>,
) -> Result<(StatusCode, Json<Comment>)> {
    let mut conn = pg_client.get_connection().await?;

    if !conn.post_exists(path_params.post_id).await? {
        return Err(ErrorKind::NotFound
            .with_message("Post not found")
            .with_resource("post"));
    }

    if let Some(parent_id) = request.parent_id {
        let parent = conn.find_comment_by_id(parent_id).await?;
        check_parent(parent.as_ref(), path_params.post_id).inspect_err(|_| {
            tracing::debug!(
                target: TRACING_TARGET,
                parent_id = %parent_id,
                "comment rejected: parent missing or on another post",
            );
        })?;
    }

    let comment = conn
        .create_comment(request.into_model(path_params.post_id, auth_claims.author_snapshot()))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        comment_id = %comment.id,
        "comment created",
    );

    Ok((StatusCode::CREATED, Json(Comment::from_model(comment))))
}

/// Deletes a comment together with every reply below it.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_claims.account_id,
        comment_id = %path_params.comment_id,
    )
)]
async fn delete_comment(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<CommentPathParams>,
) -> Result<(StatusCode, Json<CommentDeleted>)> {
    let mut conn = pg_client.get_connection().await?;

    let Some(comment) = conn.find_comment_by_id(path_params.comment_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Comment not found")
            .with_resource("comment"));
    };

    ensure_author(&comment, auth_claims.account_id)?;

    // Replies created after this read are not removed.
    let thread = conn.find_comments_by_post(comment.post_id).await?;
    let comment_ids = thread_ids(&comment, &thread);
    let deleted = conn.delete_comments_by_ids(&comment_ids).await?;

    tracing::info!(
        target: TRACING_TARGET,
        requested = comment_ids.len(),
        deleted,
        "comment thread deleted",
    );

    Ok((StatusCode::OK, Json(CommentDeleted::new(deleted))))
}

/// Returns a [`Router`] with all related routes; every one requires a session.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/posts/{postId}/comments", post(create_comment))
        .route("/comments/{commentId}", delete(delete_comment))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn comment(post_id: Uuid, parent_id: Option<Uuid>, author_id: Uuid) -> model::Comment {
        model::Comment {
            id: Uuid::now_v7(),
            post_id,
            parent_id,
            content: "reply".to_owned(),
            author_id,
            author_nickname: "ana".to_owned(),
            author_email: "ana@example.com".to_owned(),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn parent_on_same_post_is_accepted() {
        let post_id = Uuid::new_v4();
        let parent = comment(post_id, None, Uuid::new_v4());

        assert!(check_parent(Some(&parent), post_id).is_ok());
    }

    #[test]
    fn missing_or_foreign_parent_is_bad_request() {
        let post_id = Uuid::new_v4();
        let foreign = comment(Uuid::new_v4(), None, Uuid::new_v4());

        for parent in [None, Some(&foreign)] {
            let error = check_parent(parent, post_id).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::BadRequest);
            assert_eq!(error.kind().status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn only_the_author_may_delete() {
        let author_id = Uuid::new_v4();
        let target = comment(Uuid::new_v4(), None, author_id);

        assert!(ensure_author(&target, author_id).is_ok());

        let error = ensure_author(&target, Uuid::new_v4()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert_eq!(error.kind().status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn thread_ids_cover_the_whole_subtree_only() {
        let post_id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let root = comment(post_id, None, author_id);
        let reply = comment(post_id, Some(root.id), author_id);
        let nested = comment(post_id, Some(reply.id), author_id);
        let sibling = comment(post_id, None, author_id);
        let thread = vec![root.clone(), reply.clone(), nested.clone(), sibling.clone()];

        let mut ids = thread_ids(&reply, &thread);
        ids.sort();
        let mut expected = vec![reply.id, nested.id];
        expected.sort();
        assert_eq!(ids, expected);

        let all = thread_ids(&root, &thread);
        assert_eq!(all.len(), 3);
        assert!(!all.contains(&sibling.id));
    }
}

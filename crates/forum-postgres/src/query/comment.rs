//! Comment repository.

use std::collections::HashMap;
use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Comment, NewComment};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for comment database operations.
pub trait CommentRepository {
    /// Inserts a new comment.
    ///
    /// Whether `parent_id` belongs to the same post is checked by the caller.
    fn create_comment(
        &mut self,
        new_comment: NewComment,
    ) -> impl Future<Output = PgResult<Comment>> + Send;

    /// Finds a comment by its unique identifier.
    fn find_comment_by_id(
        &mut self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;

    /// Loads every comment of a post, oldest first.
    ///
    /// Comments created at the same instant are ordered by identifier, so the
    /// order is stable between calls.
    fn find_comments_by_post(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Comment>>> + Send;

    /// Counts comments per post for the given posts.
    ///
    /// Posts without comments are absent from the map.
    fn count_comments_by_posts(
        &mut self,
        post_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<HashMap<Uuid, i64>>> + Send;

    /// Deletes the given comments in one statement. Returns the number of rows removed.
    fn delete_comments_by_ids(
        &mut self,
        comment_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Deletes every comment of a post. Returns the number of rows removed.
    fn delete_comments_by_post(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<usize>> + Send;
}

impl CommentRepository for PgConnection {
    async fn create_comment(&mut self, new_comment: NewComment) -> PgResult<Comment> {
        use schema::comments;

        let comment = diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            comment_id = %comment.id,
            post_id = %comment.post_id,
            "Comment created"
        );

        Ok(comment)
    }

    async fn find_comment_by_id(&mut self, comment_id: Uuid) -> PgResult<Option<Comment>> {
        use schema::comments::{self, dsl};

        comments::table
            .filter(dsl::id.eq(comment_id))
            .select(Comment::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_comments_by_post(&mut self, post_id: Uuid) -> PgResult<Vec<Comment>> {
        use schema::comments::{self, dsl};

        comments::table
            .filter(dsl::post_id.eq(post_id))
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(Comment::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn count_comments_by_posts(&mut self, post_ids: &[Uuid]) -> PgResult<HashMap<Uuid, i64>> {
        use schema::comments::{self, dsl};

        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts: Vec<(Uuid, i64)> = comments::table
            .filter(dsl::post_id.eq_any(post_ids))
            .group_by(dsl::post_id)
            .select((dsl::post_id, diesel::dsl::count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(counts.into_iter().collect())
    }

    async fn delete_comments_by_ids(&mut self, comment_ids: &[Uuid]) -> PgResult<usize> {
        use schema::comments::{self, dsl};

        if comment_ids.is_empty() {
            return Ok(0);
        }

        let deleted = diesel::delete(comments::table.filter(dsl::id.eq_any(comment_ids)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            requested = comment_ids.len(),
            deleted,
            "Comments deleted"
        );

        Ok(deleted)
    }

    async fn delete_comments_by_post(&mut self, post_id: Uuid) -> PgResult<usize> {
        use schema::comments::{self, dsl};

        diesel::delete(comments::table.filter(dsl::post_id.eq(post_id)))
            .execute(self)
            .await
            .map_err(PgError::from)
    }
}

//! Post repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::{CommentRepository, Pagination};
use crate::model::{NewPost, Post};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for post database operations.
pub trait PostRepository {
    /// Inserts a new post.
    fn create_post(&mut self, new_post: NewPost) -> impl Future<Output = PgResult<Post>> + Send;

    /// Finds a post by its unique identifier.
    fn find_post_by_id(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;

    /// Checks whether a post exists.
    fn post_exists(&mut self, post_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists posts, newest first.
    fn list_posts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Post>>> + Send;

    /// Counts all posts.
    fn count_posts(&mut self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Deletes a single post row. Returns the number of rows removed.
    fn delete_post(&mut self, post_id: Uuid) -> impl Future<Output = PgResult<usize>> + Send;

    /// Deletes every comment of a post and then the post, in one transaction.
    ///
    /// Returns the number of deleted comments, or `None` when the post did not exist.
    fn delete_post_with_comments(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<usize>>> + Send;
}

impl PostRepository for PgConnection {
    async fn create_post(&mut self, new_post: NewPost) -> PgResult<Post> {
        use schema::posts;

        let post = diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(Post::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, post_id = %post.id, "Post created");
        Ok(post)
    }

    async fn find_post_by_id(&mut self, post_id: Uuid) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        posts::table
            .filter(dsl::id.eq(post_id))
            .select(Post::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn post_exists(&mut self, post_id: Uuid) -> PgResult<bool> {
        use schema::posts::{self, dsl};

        diesel::select(diesel::dsl::exists(posts::table.filter(dsl::id.eq(post_id))))
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_posts(&mut self, pagination: Pagination) -> PgResult<Vec<Post>> {
        use schema::posts::{self, dsl};

        posts::table
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Post::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn count_posts(&mut self) -> PgResult<i64> {
        use schema::posts;

        posts::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_post(&mut self, post_id: Uuid) -> PgResult<usize> {
        use schema::posts::{self, dsl};

        diesel::delete(posts::table.filter(dsl::id.eq(post_id)))
            .execute(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_post_with_comments(&mut self, post_id: Uuid) -> PgResult<Option<usize>> {
        let (comments, posts) = self
            .transaction(|conn| {
                async move {
                    let comments = conn.delete_comments_by_post(post_id).await?;
                    let posts = conn.delete_post(post_id).await?;
                    Ok::<_, PgError>((comments, posts))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            post_id = %post_id,
            deleted_comments = comments,
            "Post deleted with its comments"
        );

        Ok((posts > 0).then_some(comments))
    }
}

//! Post and comment constraint violations.

use forum_postgres::types::{CommentConstraints, PostConstraints};

use crate::handler::{Error, ErrorKind};

impl From<PostConstraints> for Error<'static> {
    fn from(c: PostConstraints) -> Self {
        let error = match c {
            PostConstraints::ContentLength => ErrorKind::BadRequest
                .with_message("Content must be between 1 and 4000 characters"),
            PostConstraints::ContentTrimmed => ErrorKind::BadRequest
                .with_message("Content must not start or end with whitespace"),
        };

        error.with_resource("post")
    }
}

impl From<CommentConstraints> for Error<'static> {
    fn from(c: CommentConstraints) -> Self {
        match c {
            CommentConstraints::ContentLength => ErrorKind::BadRequest
                .with_message("Content must be between 1 and 4000 characters")
                .with_resource("comment"),
            CommentConstraints::ContentTrimmed => ErrorKind::BadRequest
                .with_message("Content must not start or end with whitespace")
                .with_resource("comment"),
            CommentConstraints::ParentNotSelf => ErrorKind::BadRequest
                .with_message("A comment cannot reply to itself")
                .with_resource("comment"),
            CommentConstraints::PostReference => ErrorKind::NotFound
                .with_message("Post not found")
                .with_resource("post"),
        }
    }
}

//! Request payloads, path parameters and query parameters.

mod accounts;
mod authentication;
mod comments;
mod pagination;
mod paths;
mod posts;
mod validations;

pub use accounts::CreateAccount;
pub use authentication::Login;
pub use comments::CreateComment;
pub use pagination::PageParams;
pub use paths::{AccountPathParams, CommentPathParams, PostPathParams};
pub use posts::CreatePost;

//! Diesel models for the forum tables.

mod account;
mod comment;
mod post;

pub use account::{Account, NewAccount};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};

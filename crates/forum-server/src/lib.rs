#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

/// Tracing target for token verification and login.
pub const TRACING_TARGET_AUTHENTICATION: &str = "forum_server::authentication";

/// Tracing target for author-only checks on posts and comments.
pub const TRACING_TARGET_AUTHORIZATION: &str = "forum_server::authorization";

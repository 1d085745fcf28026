#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for comment thread assembly and traversal.
pub const TRACING_TARGET_THREAD: &str = "forum_core::thread";

mod author;
pub mod thread;

pub use author::AuthorSnapshot;
pub use thread::{CommentNode, Threaded, build_tree, collect_descendants};

//! Reply threads over a post's flat comment list.
//!
//! Comments are stored flat, each carrying an optional reference to the comment it
//! replies to. This module rebuilds the nested forest for reads ([`build_tree`]) and
//! computes the set of replies that go away with a comment ([`collect_descendants`]).
//! Both are pure functions over data already loaded from the store.

mod cascade;
mod tree;

use std::fmt;
use std::hash::Hash;

pub use cascade::collect_descendants;
pub use tree::{CommentNode, PreOrder, build_tree};

/// A comment that can take part in a reply thread.
pub trait Threaded {
    /// Opaque identifier shared by comments and the post they belong to.
    type Id: Eq + Hash + Clone + fmt::Debug;

    /// Returns the comment identifier.
    fn id(&self) -> &Self::Id;

    /// Returns the identifier of the post the comment belongs to.
    fn post_id(&self) -> &Self::Id;

    /// Returns the identifier of the parent comment, if this is a reply.
    ///
    /// `None` means the comment replies directly to the post.
    fn parent_id(&self) -> Option<&Self::Id>;
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::Threaded;

    /// Minimal comment used by the thread tests.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
    pub struct Comment {
        pub id: u32,
        pub post_id: u32,
        pub parent_id: Option<u32>,
    }

    impl Threaded for Comment {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn post_id(&self) -> &u32 {
            &self.post_id
        }

        fn parent_id(&self) -> Option<&u32> {
            self.parent_id.as_ref()
        }
    }

    pub const POST: u32 = 1000;

    pub fn comment(id: u32, parent_id: Option<u32>) -> Comment {
        Comment {
            id,
            post_id: POST,
            parent_id,
        }
    }

    /// Generates a chronologically ordered comment list where every reply points at an
    /// earlier comment, except for a few dangling references.
    pub fn generate(seed: u64, len: u32) -> Vec<Comment> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as u32
        };

        (1..=len)
            .map(|id| {
                let parent_id = match next() % 5 {
                    0 | 1 => None,
                    2 if id > 1 => Some(10_000 + next() % 100),
                    _ if id > 1 => Some(1 + next() % (id - 1)),
                    _ => None,
                };
                comment(id, parent_id)
            })
            .collect()
    }
}

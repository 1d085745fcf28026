use std::collections::HashMap;

use serde::Serialize;

use super::Threaded;
use crate::TRACING_TARGET_THREAD;

/// A comment together with its ordered replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode<T> {
    /// The comment itself, flattened into the node when serialized.
    #[serde(flatten)]
    pub comment: T,
    /// Direct replies, oldest first.
    pub replies: Vec<CommentNode<T>>,
}

impl<T> CommentNode<T> {
    /// Creates a node without replies.
    #[inline]
    pub fn new(comment: T) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Returns the number of comments in this subtree, including this one.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always `false`: a node holds at least its own comment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the subtree in pre-order (a node before its replies).
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder { stack: vec![self] }
    }
}

/// Pre-order iterator over a [`CommentNode`] subtree.
#[derive(Debug)]
pub struct PreOrder<'a, T> {
    stack: Vec<&'a CommentNode<T>>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.replies.iter().rev());
        Some(&node.comment)
    }
}

/// Builds the ordered reply forest of a post from its flat comment list.
///
/// `comments` must be sorted oldest first; that order is kept among siblings at every
/// level. A comment whose parent is not part of the list is promoted to the root level
/// instead of being dropped, so every comment of the post appears exactly once in the
/// result. Comments that belong to another post are skipped.
pub fn build_tree<T: Threaded>(post_id: &T::Id, comments: Vec<T>) -> Vec<CommentNode<T>> {
    let comments: Vec<T> = comments
        .into_iter()
        .filter(|comment| {
            let belongs = comment.post_id() == post_id;
            if !belongs {
                tracing::warn!(
                    target: TRACING_TARGET_THREAD,
                    comment_id = ?comment.id(),
                    post_id = ?post_id,
                    "Skipping comment that belongs to another post"
                );
            }
            belongs
        })
        .collect();

    let parents = resolve_parents(&comments);

    let mut roots = Vec::new();
    let mut children = vec![Vec::new(); comments.len()];
    for (position, parent) in parents.into_iter().enumerate() {
        match parent {
            Some(parent) => children[parent].push(position),
            None => roots.push(position),
        }
    }

    let mut assembler = Assembler::new(comments, children);
    let mut forest: Vec<_> = roots
        .into_iter()
        .filter_map(|root| assembler.assemble(root))
        .collect();

    // Only reachable when parent references form a cycle.
    for position in 0..assembler.visited.len() {
        if !assembler.visited[position] {
            tracing::warn!(
                target: TRACING_TARGET_THREAD,
                post_id = ?post_id,
                "Promoting comment caught in a reply cycle to the root level"
            );
            forest.extend(assembler.assemble(position));
        }
    }

    tracing::debug!(
        target: TRACING_TARGET_THREAD,
        post_id = ?post_id,
        roots = forest.len(),
        "Comment tree assembled"
    );

    forest
}

/// Maps every comment to the position of its parent, or `None` for roots and orphans.
fn resolve_parents<T: Threaded>(comments: &[T]) -> Vec<Option<usize>> {
    let index: HashMap<&T::Id, usize> = comments
        .iter()
        .enumerate()
        .map(|(position, comment)| (comment.id(), position))
        .collect();

    comments
        .iter()
        .enumerate()
        .map(|(position, comment)| {
            let parent_id = comment.parent_id()?;
            match index.get(parent_id) {
                Some(&parent) if parent != position => Some(parent),
                Some(_) => None,
                None => {
                    tracing::debug!(
                        target: TRACING_TARGET_THREAD,
                        comment_id = ?comment.id(),
                        parent_id = ?parent_id,
                        "Promoting orphaned comment to the root level"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Moves comments into nested nodes without recursion.
struct Assembler<T> {
    children: Vec<Vec<usize>>,
    slots: Vec<Option<T>>,
    built: Vec<Option<CommentNode<T>>>,
    visited: Vec<bool>,
}

impl<T> Assembler<T> {
    fn new(comments: Vec<T>, children: Vec<Vec<usize>>) -> Self {
        let len = comments.len();
        Self {
            children,
            slots: comments.into_iter().map(Some).collect(),
            built: (0..len).map(|_| None).collect(),
            visited: vec![false; len],
        }
    }

    /// Assembles the subtree rooted at `root` with a post-order walk.
    fn assemble(&mut self, root: usize) -> Option<CommentNode<T>> {
        if self.visited[root] {
            return None;
        }

        let mut stack = vec![(root, false)];
        while let Some((position, expanded)) = stack.pop() {
            if expanded {
                let Some(comment) = self.slots[position].take() else {
                    continue;
                };

                let replies = self.children[position]
                    .iter()
                    .filter_map(|&child| self.built[child].take())
                    .collect();
                self.built[position] = Some(CommentNode { comment, replies });
                continue;
            }

            if self.visited[position] {
                continue;
            }

            self.visited[position] = true;
            stack.push((position, true));
            stack.extend(
                self.children[position]
                    .iter()
                    .rev()
                    .filter(|&&child| !self.visited[child])
                    .map(|&child| (child, false)),
            );
        }

        self.built[root].take()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::thread::fixture::{Comment, POST, comment, generate};

    fn ids(forest: &[CommentNode<Comment>]) -> Vec<u32> {
        forest.iter().map(|node| node.comment.id).collect()
    }

    fn flatten(forest: &[CommentNode<Comment>]) -> Vec<&Comment> {
        forest.iter().flat_map(CommentNode::iter).collect()
    }

    #[test]
    fn nests_reply_under_its_parent() {
        let forest = build_tree(&POST, vec![comment(1, None), comment(2, Some(1))]);

        assert_eq!(ids(&forest), vec![1]);
        assert_eq!(ids(&forest[0].replies), vec![2]);
        assert!(forest[0].replies[0].replies.is_empty());
    }

    #[test]
    fn promotes_orphan_to_root() {
        let forest = build_tree(&POST, vec![comment(2, Some(99))]);

        assert_eq!(ids(&forest), vec![2]);
        assert!(forest[0].replies.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        let forest = build_tree::<Comment>(&POST, Vec::new());
        assert!(forest.is_empty());
    }

    #[test]
    fn keeps_sibling_order() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
            comment(5, Some(2)),
            comment(6, Some(1)),
        ];
        let forest = build_tree(&POST, comments);

        assert_eq!(ids(&forest), vec![1, 3]);
        assert_eq!(ids(&forest[0].replies), vec![2, 4, 6]);
        assert_eq!(ids(&forest[0].replies[0].replies), vec![5]);
    }

    #[test]
    fn orphans_keep_their_position_among_roots() {
        let comments = vec![comment(1, None), comment(2, Some(77)), comment(3, None)];
        let forest = build_tree(&POST, comments);

        assert_eq!(ids(&forest), vec![1, 2, 3]);
    }

    #[test]
    fn skips_comments_of_other_posts() {
        let mut foreign = comment(9, None);
        foreign.post_id = POST + 1;

        let forest = build_tree(&POST, vec![comment(1, None), foreign]);
        assert_eq!(ids(&forest), vec![1]);
    }

    #[test]
    fn breaks_reply_cycles_without_losing_comments() {
        let comments = vec![comment(1, Some(2)), comment(2, Some(1)), comment(3, Some(3))];
        let forest = build_tree(&POST, comments);

        let mut seen: Vec<u32> = flatten(&forest).into_iter().map(|c| c.id).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn handles_long_reply_chains() {
        let comments: Vec<_> = (1..=1_000)
            .map(|id| comment(id, (id > 1).then(|| id - 1)))
            .collect();
        let forest = build_tree(&POST, comments);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].len(), 1_000);
    }

    #[test]
    fn preserves_every_comment_and_ancestry() {
        for seed in 0..50 {
            let comments = generate(seed, 200);
            let forest = build_tree(&POST, comments.clone());

            let nodes: usize = forest.iter().map(CommentNode::len).sum();
            assert_eq!(nodes, comments.len(), "seed {seed}");

            let order: HashMap<u32, usize> = flatten(&forest)
                .into_iter()
                .enumerate()
                .map(|(position, c)| (c.id, position))
                .collect();
            assert_eq!(order.len(), comments.len(), "seed {seed}");

            for c in &comments {
                if let Some(parent) = c.parent_id.and_then(|p| order.get(&p)) {
                    assert!(parent < &order[&c.id], "seed {seed}: {c:?}");
                }
            }
        }
    }

    #[test]
    fn siblings_follow_input_order() {
        fn check(nodes: &[CommentNode<Comment>], input: &HashMap<u32, usize>) {
            let positions: Vec<usize> = nodes.iter().map(|n| input[&n.comment.id]).collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            for node in nodes {
                check(&node.replies, input);
            }
        }

        for seed in 0..20 {
            let comments = generate(seed, 150);
            let input: HashMap<u32, usize> = comments
                .iter()
                .enumerate()
                .map(|(position, c)| (c.id, position))
                .collect();

            check(&build_tree(&POST, comments), &input);
        }
    }

    #[test]
    fn serializes_comment_fields_next_to_replies() {
        let forest = build_tree(&POST, vec![comment(1, None), comment(2, Some(1))]);
        let json = serde_json::to_value(&forest).unwrap();

        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["replies"][0]["id"], 2);
        assert_eq!(json[0]["replies"][0]["parent_id"], 1);
        assert_eq!(json[0]["replies"][0]["replies"], serde_json::json!([]));
    }
}

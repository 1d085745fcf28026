use std::collections::{HashMap, HashSet};

use super::Threaded;
use crate::TRACING_TARGET_THREAD;

/// Collects `target_id` and every comment that transitively replies to it.
///
/// `comments` is the full comment set of the target's post; replies outside of it are
/// not discovered. The target itself is always part of the result, even when it is
/// missing from `comments`.
pub fn collect_descendants<T: Threaded>(target_id: &T::Id, comments: &[T]) -> HashSet<T::Id> {
    let mut children: HashMap<&T::Id, Vec<&T::Id>> = HashMap::new();
    for comment in comments {
        if let Some(parent_id) = comment.parent_id() {
            children.entry(parent_id).or_default().push(comment.id());
        }
    }

    let mut collected = HashSet::from([target_id.clone()]);
    let mut frontier = vec![target_id];
    while let Some(id) = frontier.pop() {
        let Some(replies) = children.get(id) else {
            continue;
        };

        for &reply in replies {
            if collected.insert(reply.clone()) {
                frontier.push(reply);
            }
        }
    }

    tracing::debug!(
        target: TRACING_TARGET_THREAD,
        target_id = ?target_id,
        collected = collected.len(),
        "Collected comment descendants"
    );

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::fixture::{comment, generate};

    fn thread() -> Vec<crate::thread::fixture::Comment> {
        vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
        ]
    }

    #[test]
    fn collects_whole_subtree() {
        let collected = collect_descendants(&1, &thread());
        assert_eq!(collected, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn leaf_collects_only_itself() {
        let collected = collect_descendants(&3, &thread());
        assert_eq!(collected, HashSet::from([3]));
    }

    #[test]
    fn unknown_target_collects_only_itself() {
        let collected = collect_descendants(&42, &thread());
        assert_eq!(collected, HashSet::from([42]));
    }

    #[test]
    fn repeated_runs_agree() {
        let comments = generate(7, 300);
        for target in [1, 2, 17, 150] {
            assert_eq!(
                collect_descendants(&target, &comments),
                collect_descendants(&target, &comments)
            );
        }
    }

    #[test]
    fn terminates_on_reply_cycles() {
        let comments = vec![comment(1, Some(2)), comment(2, Some(1)), comment(3, Some(2))];
        let collected = collect_descendants(&1, &comments);
        assert_eq!(collected, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn agrees_with_the_assembled_tree() {
        use crate::thread::{CommentNode, build_tree};
        use crate::thread::fixture::POST;

        let comments = generate(11, 250);
        let forest = build_tree(&POST, comments.clone());

        let mut stack: Vec<&CommentNode<_>> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            let expected: HashSet<u32> = node.iter().map(|c| c.id).collect();
            assert_eq!(collect_descendants(&node.comment.id, &comments), expected);
            stack.extend(node.replies.iter());
        }
    }
}

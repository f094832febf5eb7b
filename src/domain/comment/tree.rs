use std::collections::HashMap;

use crate::domain::comment::entity::{Comment, CommentId};

/// A root comment with every reply of its thread, oldest reply first.
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}

/// Groups `replies` under the given `roots`, keeping the roots' order.
/// Replies whose root is not among `roots` are dropped.
pub fn build_threads(roots: Vec<Comment>, replies: Vec<Comment>) -> Vec<CommentThread> {
    let mut by_root: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    for reply in replies {
        if let Some(root_id) = reply.root_id {
            by_root.entry(root_id).or_default().push(reply);
        }
    }

    roots
        .into_iter()
        .map(|root| {
            let mut replies = by_root.remove(&root.id).unwrap_or_default();
            replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            CommentThread { root, replies }
        })
        .collect()
}

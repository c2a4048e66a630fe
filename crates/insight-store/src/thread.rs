use std::collections::HashMap;

use insight_types::models::{Comment, CommentWithReplies, Id};
use tracing::debug;

/// Group one blog's comments into root comments with their direct replies.
///
/// `comments` must be in insertion order; that order is kept for roots and
/// within each reply list. Nesting is one level deep. Replies whose parent
/// is not a root in `comments` (orphans, replies to replies) are dropped.
pub fn thread(comments: Vec<Comment>) -> Vec<CommentWithReplies> {
    let (roots, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|c| c.parent_id.is_none());

    let mut by_parent: HashMap<Id, Vec<Comment>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            by_parent.entry(parent_id).or_default().push(reply);
        }
    }

    let threaded: Vec<CommentWithReplies> = roots
        .into_iter()
        .map(|root| {
            let replies = by_parent.remove(&root.id).unwrap_or_default();
            CommentWithReplies {
                comment: root,
                replies,
            }
        })
        .collect();

    let dropped: usize = by_parent.values().map(Vec::len).sum();
    if dropped > 0 {
        debug!(dropped, "Dropped replies without a root parent");
    }

    threaded
}

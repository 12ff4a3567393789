use crate::domain::shared::{
    ownership::Owned,
    reaction::{Reactable, ReactionSets},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;
use uuid::Uuid;

pub const COMMENT_MAX_LEN: u64 = 500;

/// A comment on a video. Replies point at their top-level comment through
/// `parent_id`, and the parent lists them in `reply_ids`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub video_id: Uuid,
    pub likes: i64,
    pub liked_by: Vec<Uuid>,
    pub reply_ids: Vec<Uuid>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }

    fn resource_name(&self) -> &'static str {
        "comment"
    }
}

impl Reactable for Comment {
    fn reactions(&self) -> ReactionSets {
        ReactionSets::positive_only(self.liked_by.clone())
    }

    fn apply_reactions(&mut self, sets: ReactionSets) {
        self.likes = sets.positive_count();
        self.liked_by = sets.into_parts().0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<CommentAuthor>,
}

/// A top-level comment with its replies.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct CommentThread {
    #[serde(flatten)]
    pub root: CommentView,
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: Uuid,
    pub video_id: Uuid,
    pub parent_id: Option<Uuid>,
}

/// Group a video's comments into threads.
///
/// Threads are ordered newest first, replies oldest first. A reply is
/// attached only if its parent lists it in `reply_ids`; replies whose parent
/// is gone are not shown.
pub fn build_threads(comments: Vec<CommentView>) -> Vec<CommentThread> {
    let (roots, replies): (Vec<_>, Vec<_>) = comments
        .into_iter()
        .partition(|c| c.comment.parent_id.is_none());

    let mut by_parent: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
    for reply in replies {
        if let Some(parent) = reply.comment.parent_id {
            by_parent.entry(parent).or_default().push(reply);
        }
    }

    let mut threads: Vec<CommentThread> = roots
        .into_iter()
        .map(|root| {
            let mut replies: Vec<CommentView> = by_parent
                .remove(&root.comment.id)
                .unwrap_or_default()
                .into_iter()
                .filter(|r| root.comment.reply_ids.contains(&r.comment.id))
                .collect();
            replies.sort_by_key(|r| r.comment.created_at);
            CommentThread { root, replies }
        })
        .collect();

    threads.sort_by(|a, b| b.root.comment.created_at.cmp(&a.root.comment.created_at));
    threads
}

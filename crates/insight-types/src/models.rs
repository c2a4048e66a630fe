use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id shared by every collection. Ids start at 1 and only grow.
pub type Id = i64;

/// An account. `password` always holds an argon2 hash. Not `Serialize`:
/// responses use `UserProfile`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    /// Advisory post count. Not recomputed when blogs are created.
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Id,
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Id,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category_id: Id,
    pub author_id: Id,
    pub read_time: u32,
    /// 0 or 1. At most one blog is featured by convention.
    pub is_featured: u8,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category_id: Id,
    pub author_id: Id,
    pub read_time: Option<u32>,
    pub is_featured: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id,
    pub blog_id: Id,
    pub name: String,
    pub avatar: Option<String>,
    pub content: String,
    pub like_count: u64,
    pub parent_id: Option<Id>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub blog_id: Id,
    pub name: String,
    pub avatar: Option<String>,
    pub content: String,
    pub parent_id: Option<Id>,
}

/// A blog joined with its category and author, as served to readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogWithRelations {
    #[serde(flatten)]
    pub blog: Blog,
    pub category: Category,
    pub author: Author,
}

/// A root comment and its direct replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentWithReplies {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use insight_types::models::{
    Author, Blog, BlogWithRelations, Category, Comment, CommentWithReplies, Id, NewAuthor,
    NewBlog, NewCategory, NewComment, User,
};
use tracing::debug;

use crate::enrich::enrich;
use crate::error::{EntityKind, Result, StoreError};
use crate::thread::thread;

pub const DEFAULT_READ_TIME: u32 = 5;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// One collection: rows keyed by id plus the next id to hand out.
/// Ids are assigned sequentially, so iterating `rows` yields insertion order.
pub(crate) struct Table<T> {
    next_id: Id,
    pub(crate) rows: BTreeMap<Id, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

/// The blog's entity store.
///
/// Each collection sits behind its own lock, so counter updates are
/// serialized per collection. Whenever more than one lock is held they are
/// taken in declaration order: users, categories, authors, blogs, comments.
#[derive(Default)]
pub struct Store {
    pub(crate) users: RwLock<Table<User>>,
    categories: RwLock<Table<Category>>,
    authors: RwLock<Table<Author>>,
    blogs: RwLock<Table<Blog>>,
    comments: RwLock<Table<Comment>>,
}

pub(crate) fn read<'a, T>(lock: &'a RwLock<T>, table: &'static str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| StoreError::Poisoned(table))
}

pub(crate) fn write<'a, T>(lock: &'a RwLock<T>, table: &'static str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| StoreError::Poisoned(table))
}

/// Like counters never drop below zero.
fn apply_like(count: u64, increment: bool) -> u64 {
    if increment {
        count + 1
    } else {
        count.saturating_sub(1)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Categories --

    pub fn create_category(&self, new: NewCategory) -> Result<Category> {
        let mut categories = write(&self.categories, "categories")?;
        if categories.rows.values().any(|c| c.slug == new.slug) {
            return Err(StoreError::DuplicateSlug {
                kind: EntityKind::Category,
                slug: new.slug,
            });
        }

        let category = categories.insert_with(|id| Category {
            id,
            name: new.name,
            slug: new.slug,
            count: 0,
        });
        debug!(category_id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(read(&self.categories, "categories")?.rows.values().cloned().collect())
    }

    pub fn get_category(&self, id: Id) -> Result<Option<Category>> {
        Ok(read(&self.categories, "categories")?.rows.get(&id).cloned())
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(read(&self.categories, "categories")?
            .rows
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    // -- Authors --

    pub fn create_author(&self, new: NewAuthor) -> Result<Author> {
        let author = write(&self.authors, "authors")?.insert_with(|id| Author {
            id,
            name: new.name,
            bio: new.bio,
            avatar: new.avatar,
            role: new.role,
        });
        debug!(author_id = author.id, "Author created");
        Ok(author)
    }

    pub fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(read(&self.authors, "authors")?.rows.values().cloned().collect())
    }

    pub fn get_author(&self, id: Id) -> Result<Option<Author>> {
        Ok(read(&self.authors, "authors")?.rows.get(&id).cloned())
    }

    // -- Blogs --

    /// Insert a blog. Its category and author must already exist.
    pub fn create_blog(&self, new: NewBlog) -> Result<Blog> {
        if !read(&self.categories, "categories")?.rows.contains_key(&new.category_id) {
            return Err(StoreError::DanglingReference {
                kind: EntityKind::Category,
                id: new.category_id,
            });
        }
        if !read(&self.authors, "authors")?.rows.contains_key(&new.author_id) {
            return Err(StoreError::DanglingReference {
                kind: EntityKind::Author,
                id: new.author_id,
            });
        }

        let mut blogs = write(&self.blogs, "blogs")?;
        if blogs.rows.values().any(|b| b.slug == new.slug) {
            return Err(StoreError::DuplicateSlug {
                kind: EntityKind::Blog,
                slug: new.slug,
            });
        }

        let blog = blogs.insert_with(|id| Blog {
            id,
            title: new.title,
            slug: new.slug,
            excerpt: new.excerpt,
            content: new.content,
            cover_image: new.cover_image,
            category_id: new.category_id,
            author_id: new.author_id,
            read_time: new.read_time.unwrap_or(DEFAULT_READ_TIME),
            is_featured: new.is_featured.unwrap_or(0),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            published_at: Utc::now(),
            tags: new.tags,
        });
        debug!(blog_id = blog.id, slug = %blog.slug, "Blog created");
        Ok(blog)
    }

    pub fn list_blogs(&self) -> Result<Vec<BlogWithRelations>> {
        let blogs = self.select_blogs(|_| true)?;
        self.enrich_all(blogs)
    }

    pub fn get_blog(&self, id: Id) -> Result<Option<BlogWithRelations>> {
        let blog = read(&self.blogs, "blogs")?.rows.get(&id).cloned();
        blog.map(|b| self.enrich_one(b)).transpose()
    }

    pub fn get_blog_by_slug(&self, slug: &str) -> Result<Option<BlogWithRelations>> {
        let blog = read(&self.blogs, "blogs")?
            .rows
            .values()
            .find(|b| b.slug == slug)
            .cloned();
        blog.map(|b| self.enrich_one(b)).transpose()
    }

    /// The first blog flagged as featured, if any.
    pub fn featured_blog(&self) -> Result<Option<BlogWithRelations>> {
        let blog = read(&self.blogs, "blogs")?
            .rows
            .values()
            .find(|b| b.is_featured == 1)
            .cloned();
        blog.map(|b| self.enrich_one(b)).transpose()
    }

    pub fn blogs_in_category(&self, category_id: Id) -> Result<Vec<BlogWithRelations>> {
        let blogs = self.select_blogs(|b| b.category_id == category_id)?;
        self.enrich_all(blogs)
    }

    /// Up to `limit` other blogs from the same category. Empty when the
    /// blog itself does not exist.
    pub fn related_blogs(&self, blog_id: Id, limit: usize) -> Result<Vec<BlogWithRelations>> {
        let related: Vec<Blog> = {
            let blogs = read(&self.blogs, "blogs")?;
            let Some(blog) = blogs.rows.get(&blog_id) else {
                return Ok(vec![]);
            };
            blogs
                .rows
                .values()
                .filter(|b| b.id != blog_id && b.category_id == blog.category_id)
                .take(limit)
                .cloned()
                .collect()
        };
        self.enrich_all(related)
    }

    /// Add one view. Returns the new count, or `None` for an unknown blog.
    pub fn increment_views(&self, id: Id) -> Result<Option<u64>> {
        let mut blogs = write(&self.blogs, "blogs")?;
        Ok(blogs.rows.get_mut(&id).map(|blog| {
            blog.view_count += 1;
            blog.view_count
        }))
    }

    /// Add or remove one like. Returns the new count, or `None` for an
    /// unknown blog.
    pub fn update_blog_likes(&self, id: Id, increment: bool) -> Result<Option<u64>> {
        let mut blogs = write(&self.blogs, "blogs")?;
        Ok(blogs.rows.get_mut(&id).map(|blog| {
            blog.like_count = apply_like(blog.like_count, increment);
            blog.like_count
        }))
    }

    fn select_blogs(&self, keep: impl Fn(&Blog) -> bool) -> Result<Vec<Blog>> {
        Ok(read(&self.blogs, "blogs")?
            .rows
            .values()
            .filter(|b| keep(b))
            .cloned()
            .collect())
    }

    fn enrich_one(&self, blog: Blog) -> Result<BlogWithRelations> {
        let categories = read(&self.categories, "categories")?;
        let authors = read(&self.authors, "authors")?;
        enrich(blog, &categories.rows, &authors.rows)
    }

    fn enrich_all(&self, blogs: Vec<Blog>) -> Result<Vec<BlogWithRelations>> {
        let categories = read(&self.categories, "categories")?;
        let authors = read(&self.authors, "authors")?;
        blogs
            .into_iter()
            .map(|blog| enrich(blog, &categories.rows, &authors.rows))
            .collect()
    }

    // -- Comments --

    /// Insert a comment and bump its blog's comment count as one step.
    /// Fails with `DanglingReference` and changes nothing when the blog
    /// does not exist. The parent id is stored as given.
    pub fn create_comment(&self, new: NewComment) -> Result<Comment> {
        let mut blogs = write(&self.blogs, "blogs")?;
        let mut comments = write(&self.comments, "comments")?;

        let Some(blog) = blogs.rows.get_mut(&new.blog_id) else {
            return Err(StoreError::DanglingReference {
                kind: EntityKind::Blog,
                id: new.blog_id,
            });
        };

        let comment = comments.insert_with(|id| Comment {
            id,
            blog_id: new.blog_id,
            name: new.name,
            avatar: new.avatar,
            content: new.content,
            like_count: 0,
            parent_id: new.parent_id,
            created_at: Utc::now(),
        });
        blog.comment_count += 1;

        debug!(
            comment_id = comment.id,
            blog_id = comment.blog_id,
            parent_id = ?comment.parent_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub fn get_comment(&self, id: Id) -> Result<Option<Comment>> {
        Ok(read(&self.comments, "comments")?.rows.get(&id).cloned())
    }

    /// A blog's comments as root comments with their replies attached.
    pub fn comments_for_blog(&self, blog_id: Id) -> Result<Vec<CommentWithReplies>> {
        let comments: Vec<Comment> = read(&self.comments, "comments")?
            .rows
            .values()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect();
        Ok(thread(comments))
    }

    pub fn update_comment_likes(&self, id: Id, increment: bool) -> Result<Option<u64>> {
        let mut comments = write(&self.comments, "comments")?;
        Ok(comments.rows.get_mut(&id).map(|comment| {
            comment.like_count = apply_like(comment.like_count, increment);
            comment.like_count
        }))
    }
}

use std::collections::BTreeMap;

use insight_types::models::{Author, Blog, BlogWithRelations, Category, Id};

use crate::error::{EntityKind, Result, StoreError};

/// Join a blog with its category and author.
///
/// A blog whose category or author is missing yields
/// [`StoreError::DanglingReference`] rather than a partial record.
pub fn enrich(
    blog: Blog,
    categories: &BTreeMap<Id, Category>,
    authors: &BTreeMap<Id, Author>,
) -> Result<BlogWithRelations> {
    let category = categories
        .get(&blog.category_id)
        .cloned()
        .ok_or(StoreError::DanglingReference {
            kind: EntityKind::Category,
            id: blog.category_id,
        })?;

    let author = authors
        .get(&blog.author_id)
        .cloned()
        .ok_or(StoreError::DanglingReference {
            kind: EntityKind::Author,
            id: blog.author_id,
        })?;

    Ok(BlogWithRelations {
        blog,
        category,
        author,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(category_id: Id, author_id: Id) -> Blog {
        Blog {
            id: 1,
            title: "Fjords".into(),
            slug: "fjords".into(),
            excerpt: String::new(),
            content: String::new(),
            cover_image: String::new(),
            category_id,
            author_id,
            read_time: 4,
            is_featured: 0,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            published_at: chrono::Utc::now(),
            tags: vec![],
        }
    }

    fn tables() -> (BTreeMap<Id, Category>, BTreeMap<Id, Author>) {
        let categories = (1..=3)
            .map(|id| {
                let category = Category {
                    id,
                    name: format!("Category {id}"),
                    slug: format!("category-{id}"),
                    count: 0,
                };
                (id, category)
            })
            .collect();
        let authors = (1..=3)
            .map(|id| {
                let author = Author {
                    id,
                    name: format!("Author {id}"),
                    bio: None,
                    avatar: None,
                    role: None,
                };
                (id, author)
            })
            .collect();
        (categories, authors)
    }

    #[test]
    fn joins_category_and_author() {
        let (categories, authors) = tables();
        let enriched = enrich(blog(2, 3), &categories, &authors).unwrap();
        assert_eq!(enriched.category.id, 2);
        assert_eq!(enriched.author.id, 3);
        assert_eq!(enriched.blog.slug, "fjords");
    }

    #[test]
    fn missing_category_is_dangling() {
        let (categories, authors) = tables();
        let err = enrich(blog(9, 1), &categories, &authors).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DanglingReference { kind: EntityKind::Category, id: 9 }
        ));
    }

    #[test]
    fn missing_author_is_dangling() {
        let (categories, authors) = tables();
        let err = enrich(blog(1, 42), &categories, &authors).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DanglingReference { kind: EntityKind::Author, id: 42 }
        ));
    }
}

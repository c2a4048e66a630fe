//! Sample travel content loaded into a fresh store at startup.

use insight_types::models::{NewAuthor, NewBlog, NewCategory, NewComment};
use tracing::info;

use crate::error::Result;
use crate::store::Store;

const CATEGORIES: [(&str, &str); 5] = [
    ("Travel", "travel"),
    ("Food", "food"),
    ("Culture", "culture"),
    ("Nature", "nature"),
    ("History", "history"),
];

struct SampleAuthor {
    name: &'static str,
    bio: &'static str,
    avatar: &'static str,
    role: &'static str,
}

const AUTHORS: [SampleAuthor; 4] = [
    SampleAuthor {
        name: "Naomi Chen",
        bio: "Travel writer and photographer based in Singapore, chasing Asia's quieter cultural corners.",
        avatar: "https://randomuser.me/api/portraits/women/44.jpg",
        role: "Travel Writer & Photographer",
    },
    SampleAuthor {
        name: "Erik Johansson",
        bio: "Adventure guide with a background in environmental science.",
        avatar: "https://randomuser.me/api/portraits/men/32.jpg",
        role: "Adventure Guide",
    },
    SampleAuthor {
        name: "Priya Sharma",
        bio: "Cook and critic who collects street food recipes wherever she goes.",
        avatar: "https://randomuser.me/api/portraits/women/68.jpg",
        role: "Food Critic & Chef",
    },
    SampleAuthor {
        name: "Carlos Mendoza",
        bio: "Anthropologist working with indigenous communities across Latin America.",
        avatar: "https://randomuser.me/api/portraits/men/75.jpg",
        role: "Cultural Anthropologist",
    },
];

struct SampleBlog {
    title: &'static str,
    slug: &'static str,
    excerpt: &'static str,
    content: &'static str,
    cover_image: &'static str,
    category_id: i64,
    author_id: i64,
    read_time: u32,
    is_featured: u8,
    tags: &'static [&'static str],
}

const BLOGS: [SampleBlog; 4] = [
    SampleBlog {
        title: "Exploring the Hidden Gems of Tokyo: Beyond the Tourist Trails",
        slug: "exploring-hidden-gems-tokyo",
        excerpt: "Old shopping streets, stepping-stone gardens and neighbourhood food stalls most visitors never find.",
        content: "<p>Tokyo's quieter districts reward anyone willing to wander off the main lines.</p>\
                  <h2>Yanaka</h2><p>Wooden houses, family shops and a pace closer to a small town.</p>\
                  <h2>Kiyosumi Garden</h2><p>Stepping stones gathered from across Japan cross still ponds.</p>",
        cover_image: "https://images.unsplash.com/photo-1530521954074-e64f6810b32d?auto=format&fit=crop&w=1200&h=600&q=80",
        category_id: 1,
        author_id: 1,
        read_time: 5,
        is_featured: 1,
        tags: &["tokyo", "japan", "travel", "culture", "food", "gardens"],
    },
    SampleBlog {
        title: "Norway's Stunning Fjords: A Journey Through Scandinavia's Natural Wonders",
        slug: "norway-stunning-fjords",
        excerpt: "Glacier-carved inlets, waterfalls and villages clinging to the water's edge.",
        content: "<p>Ice Age glaciers cut these valleys before the sea flooded in.</p>\
                  <h2>Geirangerfjord</h2><p>Waterfalls drop straight into deep green water.</p>",
        cover_image: "https://images.unsplash.com/photo-1551649001-7a211404ce40?auto=format&fit=crop&w=600&h=400&q=80",
        category_id: 4,
        author_id: 2,
        read_time: 4,
        is_featured: 0,
        tags: &["norway", "fjords", "travel", "nature", "scandinavia", "landscapes"],
    },
    SampleBlog {
        title: "The Street Food Revolution of India: From Chaat to Global Sensation",
        slug: "street-food-revolution-india",
        excerpt: "How roadside snacks became one of the country's best-known exports.",
        content: "<p>Every city has a dish it will argue about for hours.</p>\
                  <h2>Chaat</h2><p>Sweet, sour, crunchy and hot in a single bite.</p>",
        cover_image: "https://images.unsplash.com/photo-1604697803931-0190de242d31?auto=format&fit=crop&w=600&h=400&q=80",
        category_id: 2,
        author_id: 3,
        read_time: 6,
        is_featured: 0,
        tags: &["india", "street food", "cuisine", "culture", "travel", "food"],
    },
    SampleBlog {
        title: "The Ancient Wisdom of Peru: Traditions That Survived Centuries",
        slug: "ancient-wisdom-peru",
        excerpt: "Weaving, farming and ceremony in the Andean highlands.",
        content: "<p>High in the Andes, techniques older than the Inca are still in daily use.</p>\
                  <h2>Terraces</h2><p>Stone terraces still hold soil and water on steep slopes.</p>",
        cover_image: "https://images.unsplash.com/photo-1519211975560-4ca611f5a72a?auto=format&fit=crop&w=600&h=400&q=80",
        category_id: 3,
        author_id: 4,
        read_time: 7,
        is_featured: 0,
        tags: &["peru", "culture", "traditions", "history", "indigenous", "andes"],
    },
];

/// (name, avatar, content, parent id, likes)
const COMMENTS: [(&str, &str, &str, Option<i64>, u64); 3] = [
    (
        "Sarah Johnson",
        "https://randomuser.me/api/portraits/women/32.jpg",
        "Yanaka was the highlight of my last trip. Thanks for the coffee tip!",
        None,
        23,
    ),
    (
        "Naomi Chen",
        "https://randomuser.me/api/portraits/women/44.jpg",
        "So glad you found it, Sarah. Try the side streets behind the temple next time.",
        Some(1),
        8,
    ),
    (
        "David Kim",
        "https://randomuser.me/api/portraits/men/45.jpg",
        "Bookmarking this for my spring trip. Is Kiyosumi busy on weekends?",
        None,
        15,
    ),
];

/// Fill `store` with the sample categories, authors, blogs and comments.
/// Goes through the regular create operations, so blog 1 ends up with a
/// comment count of 3.
pub fn seed(store: &Store) -> Result<()> {
    for (name, slug) in CATEGORIES {
        store.create_category(NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
        })?;
    }

    for author in &AUTHORS {
        store.create_author(NewAuthor {
            name: author.name.to_string(),
            bio: Some(author.bio.to_string()),
            avatar: Some(author.avatar.to_string()),
            role: Some(author.role.to_string()),
        })?;
    }

    for blog in &BLOGS {
        store.create_blog(NewBlog {
            title: blog.title.to_string(),
            slug: blog.slug.to_string(),
            excerpt: blog.excerpt.to_string(),
            content: blog.content.to_string(),
            cover_image: blog.cover_image.to_string(),
            category_id: blog.category_id,
            author_id: blog.author_id,
            read_time: Some(blog.read_time),
            is_featured: Some(blog.is_featured),
            tags: blog.tags.iter().map(|t| t.to_string()).collect(),
        })?;
    }

    for (name, avatar, content, parent_id, likes) in COMMENTS {
        let comment = store.create_comment(NewComment {
            blog_id: 1,
            name: name.to_string(),
            avatar: Some(avatar.to_string()),
            content: content.to_string(),
            parent_id,
        })?;
        for _ in 0..likes {
            store.update_comment_likes(comment.id, true)?;
        }
    }

    info!(
        categories = CATEGORIES.len(),
        authors = AUTHORS.len(),
        blogs = BLOGS.len(),
        comments = COMMENTS.len(),
        "Sample content loaded"
    );
    Ok(())
}

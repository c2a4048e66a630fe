use std::fmt;

use insight_types::models::Id;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Category,
    Author,
    Blog,
    Comment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Category => "category",
            Self::Author => "author",
            Self::Blog => "blog",
            Self::Comment => "comment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record points at another record that does not exist.
    #[error("{kind} {id} is referenced but does not exist")]
    DanglingReference { kind: EntityKind, id: Id },

    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("{kind} slug '{slug}' is already taken")]
    DuplicateSlug { kind: EntityKind, slug: String },

    #[error("{0} table lock poisoned")]
    Poisoned(&'static str),

    /// Failure inside a persistent user store.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

//! In-memory entity store for the blog: tables for users, categories,
//! authors, blogs and comments, plus the read-side joins (relation
//! enrichment and comment threading) and the counter mutators.

pub mod enrich;
pub mod error;
pub mod seed;
pub mod store;
pub mod thread;
pub mod users;

pub use error::{EntityKind, Result, StoreError};
pub use store::Store;
pub use users::UserStore;

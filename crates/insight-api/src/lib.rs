pub mod auth;
pub mod authors;
pub mod blogs;
pub mod categories;
pub mod comments;
pub mod countries;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, AppStateInner};

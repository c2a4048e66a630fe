use insight_types::models::{Id, User};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{Store, read, write};

/// Account storage used by the auth handlers. Implemented by the in-memory
/// [`Store`] and by the SQLite database in `insight-db`.
pub trait UserStore: Send + Sync {
    /// Create an account. `password_hash` must already be hashed.
    /// Fails with [`StoreError::DuplicateUsername`] if the name is taken.
    fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;

    fn get_user(&self, id: Id) -> Result<Option<User>>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

impl UserStore for Store {
    fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut users = write(&self.users, "users")?;
        if users.rows.values().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let user = users.insert_with(|id| User {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
        });
        debug!(user_id = user.id, "User created");
        Ok(user)
    }

    fn get_user(&self, id: Id) -> Result<Option<User>> {
        Ok(read(&self.users, "users")?.rows.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(read(&self.users, "users")?
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

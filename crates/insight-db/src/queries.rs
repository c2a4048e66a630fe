use crate::Database;
use crate::models::UserRow;
use anyhow::Result;
use insight_store::{StoreError, UserStore};
use insight_types::models::{Id, User};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row};
use tracing::debug;

impl Database {
    // -- Users --

    /// Insert a user and return its new id.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username", username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }
}

fn query_user(conn: &Connection, column: &str, value: impl rusqlite::ToSql) -> Result<Option<UserRow>> {
    let sql = format!("SELECT id, username, password, created_at FROM users WHERE {column} = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    let row = stmt.query_row([value], user_row).optional()?;
    Ok(row)
}

fn user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<rusqlite::Error>()
        .and_then(rusqlite::Error::sqlite_error_code)
        == Some(ErrorCode::ConstraintViolation)
}

impl UserStore for Database {
    fn create_user(&self, username: &str, password_hash: &str) -> insight_store::Result<User> {
        match Database::create_user(self, username, password_hash) {
            Ok(id) => {
                debug!(user_id = id, "User created");
                Ok(User {
                    id,
                    username: username.to_string(),
                    password: password_hash.to_string(),
                })
            }
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_user(&self, id: Id) -> insight_store::Result<Option<User>> {
        Ok(self.get_user_by_id(id)?.map(User::from))
    }

    fn get_user_by_username(&self, username: &str) -> insight_store::Result<Option<User>> {
        Ok(Database::get_user_by_username(self, username)?.map(User::from))
    }
}

use insight_types::models::User;

/// A `users` row. Kept apart from the shared `User` model so the
/// storage layout can change without touching the API.
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

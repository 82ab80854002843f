use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub zip_code: Option<i32>,
    /// Enrolled courses, in the order they were joined.
    pub courses: Vec<Uuid>,
    /// Mailing-list record sharing this user's email, if one existed when
    /// the account was created.
    pub subscribed_account: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A mailing-list signup.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub zip_code: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

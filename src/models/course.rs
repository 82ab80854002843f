use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub max_students: i32,
    pub cost: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

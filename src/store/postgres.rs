use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

use super::{CourseStore, StoreError, SubscriberStore, UserStore};
use crate::domain::{NewCourse, NewSubscriber, UserChanges};
use crate::models::{Course, Subscriber, User};

const SUBSCRIBER_COLUMNS: &str =
    "id, name, email, zip_code, created_at, updated_at";
const USER_COLUMNS: &str = "id, first_name, last_name, email, zip_code, \
    courses, subscribed_account, created_at, updated_at";
const COURSE_COLUMNS: &str =
    "id, title, description, max_students, cost, created_at, updated_at";

/// Postgres-backed store. Each collection lives in its own table
/// (`subscribers`, `users`, `courses`); uniqueness is enforced by the schema.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique violations (`23505`) to [`StoreError::Conflict`].
fn map_sqlx_error(
    operation: &'static str,
    conflict: &str,
    e: sqlx::Error,
) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::Conflict(conflict.to_string());
        }
    }
    StoreError::Unexpected(anyhow::Error::new(e).context(operation))
}

#[async_trait]
impl SubscriberStore for PostgresStore {
    #[tracing::instrument(name = "list subscribers", skip(self))]
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        let subscribers = sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list subscribers")?;
        Ok(subscribers)
    }

    #[tracing::instrument(name = "find subscriber", skip(self))]
    async fn find_subscriber(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscriber>, StoreError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch subscriber")?;
        Ok(subscriber)
    }

    #[tracing::instrument(name = "find subscriber by email", skip(self))]
    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, StoreError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch subscriber by email")?;
        Ok(subscriber)
    }

    #[tracing::instrument(
        name = "saving new subscriber details in the database",
        skip(self, subscriber)
    )]
    async fn insert_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<Subscriber, StoreError> {
        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            INSERT INTO subscribers (
                id, name, email, zip_code, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, now(), now())
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(subscriber.name.as_ref())
        .bind(subscriber.email.as_ref())
        .bind(subscriber.zip_code.map(|z| z.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to insert subscriber",
                "A subscriber with that email already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "update subscriber", skip(self, subscriber))]
    async fn update_subscriber(
        &self,
        id: Uuid,
        subscriber: &NewSubscriber,
    ) -> Result<Option<Subscriber>, StoreError> {
        sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            UPDATE subscribers
            SET name = $2, email = $3, zip_code = $4, updated_at = now()
            WHERE id = $1
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(subscriber.name.as_ref())
        .bind(subscriber.email.as_ref())
        .bind(subscriber.zip_code.map(|z| z.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to update subscriber",
                "A subscriber with that email already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "delete subscriber", skip(self))]
    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete subscriber")?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    #[tracing::instrument(name = "list users", skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list users")?;
        Ok(users)
    }

    #[tracing::instrument(name = "find user", skip(self))]
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch user")?;
        Ok(user)
    }

    #[tracing::instrument(name = "find user by email", skip(self))]
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch user by email")?;
        Ok(user)
    }

    #[tracing::instrument(name = "get stored credentials", skip(self, email))]
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, StoreError> {
        let row: Option<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("failed to perform query to retrieve stored credentials")?;

        Ok(row.map(|(id, hash)| (id, Secret::new(hash))))
    }

    #[tracing::instrument(
        name = "saving new user details in the database",
        skip(self, profile, password_hash)
    )]
    async fn insert_user(
        &self,
        profile: &UserChanges,
        subscribed_account: Option<Uuid>,
        password_hash: Secret<String>,
    ) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                id, first_name, last_name, email, zip_code,
                courses, subscribed_account, password_hash,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, '{{}}', $6, $7, now(), now())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(profile.first_name.as_ref())
        .bind(profile.last_name.as_ref())
        .bind(profile.email.as_ref())
        .bind(profile.zip_code.map(|z| z.value()))
        .bind(subscribed_account)
        .bind(password_hash.expose_secret().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to insert user",
                "A user with that email already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "update user", skip(self, changes))]
    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, zip_code = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.first_name.as_ref())
        .bind(changes.last_name.as_ref())
        .bind(changes.email.as_ref())
        .bind(changes.zip_code.map(|z| z.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to update user",
                "A user with that email already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "delete user", skip(self))]
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete user")?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "enroll user in course", skip(self))]
    async fn enroll_user(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET courses = CASE
                    WHEN $2 = ANY(courses) THEN courses
                    ELSE array_append(courses, $2)
                END,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to add course to user")?;
        Ok(user)
    }
}

#[async_trait]
impl CourseStore for PostgresStore {
    #[tracing::instrument(name = "list courses", skip(self))]
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list courses")?;
        Ok(courses)
    }

    #[tracing::instrument(name = "find course", skip(self))]
    async fn find_course(
        &self,
        id: Uuid,
    ) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch course")?;
        Ok(course)
    }

    #[tracing::instrument(
        name = "saving new course in the database",
        skip(self, course)
    )]
    async fn insert_course(
        &self,
        course: &NewCourse,
    ) -> Result<Course, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            INSERT INTO courses (
                id, title, description, max_students, cost,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(course.title.as_ref())
        .bind(course.description.as_ref())
        .bind(course.max_students.value())
        .bind(course.cost.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to insert course",
                "A course with that title already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "update course", skip(self, course))]
    async fn update_course(
        &self,
        id: Uuid,
        course: &NewCourse,
    ) -> Result<Option<Course>, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            UPDATE courses
            SET title = $2, description = $3, max_students = $4, cost = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(course.title.as_ref())
        .bind(course.description.as_ref())
        .bind(course.max_students.value())
        .bind(course.cost.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                "failed to update course",
                "A course with that title already exists.",
                e,
            )
        })
    }

    #[tracing::instrument(name = "delete course", skip(self))]
    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete course")?;
        Ok(result.rows_affected() > 0)
    }
}

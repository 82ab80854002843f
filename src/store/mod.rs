//! Data access for subscribers, users and courses.
//!
//! Handlers only see the [`Store`] traits. [`PostgresStore`] backs the running
//! application; [`InMemoryStore`] keeps everything in process memory and is
//! used by the test-suite.

mod in_memory;
mod postgres;

use async_trait::async_trait;
use secrecy::Secret;
use uuid::Uuid;

use crate::domain::{NewCourse, NewSubscriber, UserChanges};
use crate::models::{Course, Subscriber, User};
use crate::routes::error_chain_fmt;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(thiserror::Error)]
pub enum StoreError {
    /// A unique field (email, course title) is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, StoreError>;

    async fn find_subscriber(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscriber>, StoreError>;

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, StoreError>;

    async fn insert_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<Subscriber, StoreError>;

    /// Returns `None` when no subscriber has the given id.
    async fn update_subscriber(
        &self,
        id: Uuid,
        subscriber: &NewSubscriber,
    ) -> Result<Option<Subscriber>, StoreError>;

    /// Returns `false` when no subscriber has the given id.
    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Id and password hash of the account registered under `email`.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, StoreError>;

    async fn insert_user(
        &self,
        profile: &UserChanges,
        subscribed_account: Option<Uuid>,
        password_hash: Secret<String>,
    ) -> Result<User, StoreError>;

    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError>;

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Appends `course_id` to the user's courses unless already present.
    async fn enroll_user(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    async fn find_course(
        &self,
        id: Uuid,
    ) -> Result<Option<Course>, StoreError>;

    async fn insert_course(
        &self,
        course: &NewCourse,
    ) -> Result<Course, StoreError>;

    async fn update_course(
        &self,
        id: Uuid,
        course: &NewCourse,
    ) -> Result<Option<Course>, StoreError>;

    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError>;
}

pub trait Store: SubscriberStore + UserStore + CourseStore {}

impl<T> Store for T where T: SubscriberStore + UserStore + CourseStore {}

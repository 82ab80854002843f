use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::Secret;
use uuid::Uuid;

use super::{CourseStore, StoreError, SubscriberStore, UserStore};
use crate::domain::{NewCourse, NewSubscriber, UserChanges};
use crate::models::{Course, Subscriber, User};

struct UserEntry {
    user: User,
    password_hash: Secret<String>,
}

#[derive(Default)]
struct Collections {
    subscribers: Vec<Subscriber>,
    users: Vec<UserEntry>,
    courses: Vec<Course>,
}

/// Process-local store. Records are kept in insertion order; uniqueness
/// rules mirror the Postgres schema.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| {
                anyhow::anyhow!("in-memory store lock poisoned").into()
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| {
                anyhow::anyhow!("in-memory store lock poisoned").into()
            })
    }
}

fn email_taken(kind: &str) -> StoreError {
    StoreError::Conflict(format!("A {} with that email already exists.", kind))
}

#[async_trait]
impl SubscriberStore for InMemoryStore {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        Ok(self.read()?.subscribers.clone())
    }

    async fn find_subscriber(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscriber>, StoreError> {
        Ok(self.read()?.subscribers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, StoreError> {
        Ok(self
            .read()?
            .subscribers
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<Subscriber, StoreError> {
        let mut collections = self.write()?;
        let email = subscriber.email.as_ref();
        if collections.subscribers.iter().any(|s| s.email == email) {
            return Err(email_taken("subscriber"));
        }

        let now = Utc::now();
        let record = Subscriber {
            id: Uuid::new_v4(),
            name: subscriber.name.as_ref().to_string(),
            email: email.to_string(),
            zip_code: subscriber.zip_code.map(|z| z.value()),
            created_at: now,
            updated_at: now,
        };
        collections.subscribers.push(record.clone());
        Ok(record)
    }

    async fn update_subscriber(
        &self,
        id: Uuid,
        subscriber: &NewSubscriber,
    ) -> Result<Option<Subscriber>, StoreError> {
        let mut collections = self.write()?;
        let email = subscriber.email.as_ref();
        if collections
            .subscribers
            .iter()
            .any(|s| s.email == email && s.id != id)
        {
            return Err(email_taken("subscriber"));
        }

        let Some(record) =
            collections.subscribers.iter_mut().find(|s| s.id == id)
        else {
            return Ok(None);
        };
        record.name = subscriber.name.as_ref().to_string();
        record.email = email.to_string();
        record.zip_code = subscriber.zip_code.map(|z| z.value());
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.write()?;
        let before = collections.subscribers.len();
        collections.subscribers.retain(|s| s.id != id);
        Ok(collections.subscribers.len() != before)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.iter().map(|e| e.user.clone()).collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|e| e.user.id == id)
            .map(|e| e.user.clone()))
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|e| e.user.email == email)
            .map(|e| e.user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|e| e.user.email == email)
            .map(|e| (e.user.id, e.password_hash.clone())))
    }

    async fn insert_user(
        &self,
        profile: &UserChanges,
        subscribed_account: Option<Uuid>,
        password_hash: Secret<String>,
    ) -> Result<User, StoreError> {
        let mut collections = self.write()?;
        let email = profile.email.as_ref();
        if collections.users.iter().any(|e| e.user.email == email) {
            return Err(email_taken("user"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: profile.first_name.as_ref().to_string(),
            last_name: profile.last_name.as_ref().to_string(),
            email: email.to_string(),
            zip_code: profile.zip_code.map(|z| z.value()),
            courses: Vec::new(),
            subscribed_account,
            created_at: now,
            updated_at: now,
        };
        collections.users.push(UserEntry {
            user: user.clone(),
            password_hash,
        });
        Ok(user)
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut collections = self.write()?;
        let email = changes.email.as_ref();
        if collections
            .users
            .iter()
            .any(|e| e.user.email == email && e.user.id != id)
        {
            return Err(email_taken("user"));
        }

        let Some(entry) = collections.users.iter_mut().find(|e| e.user.id == id)
        else {
            return Ok(None);
        };
        let user = &mut entry.user;
        user.first_name = changes.first_name.as_ref().to_string();
        user.last_name = changes.last_name.as_ref().to_string();
        user.email = email.to_string();
        user.zip_code = changes.zip_code.map(|z| z.value());
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.write()?;
        let before = collections.users.len();
        collections.users.retain(|e| e.user.id != id);
        Ok(collections.users.len() != before)
    }

    async fn enroll_user(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<User>, StoreError> {
        let mut collections = self.write()?;
        let Some(entry) =
            collections.users.iter_mut().find(|e| e.user.id == user_id)
        else {
            return Ok(None);
        };
        let user = &mut entry.user;
        if !user.courses.contains(&course_id) {
            user.courses.push(course_id);
            user.updated_at = Utc::now();
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.read()?.courses.clone())
    }

    async fn find_course(
        &self,
        id: Uuid,
    ) -> Result<Option<Course>, StoreError> {
        Ok(self.read()?.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_course(
        &self,
        course: &NewCourse,
    ) -> Result<Course, StoreError> {
        let mut collections = self.write()?;
        let title = course.title.as_ref();
        if collections.courses.iter().any(|c| c.title == title) {
            return Err(StoreError::Conflict(
                "A course with that title already exists.".into(),
            ));
        }

        let now = Utc::now();
        let record = Course {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: course.description.as_ref().to_string(),
            max_students: course.max_students.value(),
            cost: course.cost.value(),
            created_at: now,
            updated_at: now,
        };
        collections.courses.push(record.clone());
        Ok(record)
    }

    async fn update_course(
        &self,
        id: Uuid,
        course: &NewCourse,
    ) -> Result<Option<Course>, StoreError> {
        let mut collections = self.write()?;
        let title = course.title.as_ref();
        if collections
            .courses
            .iter()
            .any(|c| c.title == title && c.id != id)
        {
            return Err(StoreError::Conflict(
                "A course with that title already exists.".into(),
            ));
        }

        let Some(record) = collections.courses.iter_mut().find(|c| c.id == id)
        else {
            return Ok(None);
        };
        record.title = title.to_string();
        record.description = course.description.as_ref().to_string();
        record.max_students = course.max_students.value();
        record.cost = course.cost.value();
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.write()?;
        let before = collections.courses.len();
        collections.courses.retain(|c| c.id != id);
        Ok(collections.courses.len() != before)
    }
}

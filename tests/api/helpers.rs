use std::sync::Arc;

use confetti_cuisine::authentication::compute_password_hash;
use confetti_cuisine::configuration::get_config;
use confetti_cuisine::domain::UserChanges;
use confetti_cuisine::startup::Application;
use confetti_cuisine::domain::{NewCourse, NewSubscriber};
use confetti_cuisine::models::{Course, Subscriber, User};
use confetti_cuisine::store::{
    CourseStore, InMemoryStore, Store, StoreError, SubscriberStore, UserStore,
};
use confetti_cuisine::telemetry::{get_subscriber, init_subscriber};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use secrecy::Secret;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Logs are dropped unless asked for:
    // `TEST_LOG=1 cargo test login_works | bunyan`
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink,
        );
        init_subscriber(subscriber);
    }
});

pub struct TestUser {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    async fn store(store: &InMemoryStore) -> Self {
        let first_name = "Jon".to_string();
        let last_name = "Wexler".to_string();
        let email = format!("{}@example.com", Uuid::new_v4());
        let password = Uuid::new_v4().to_string();

        let profile = UserChanges::parse(
            first_name.clone(),
            last_name.clone(),
            email.clone(),
            Some("12345".into()),
        )
        .expect("test user should be valid");
        let password_hash = compute_password_hash(Secret::new(password.clone()))
            .await
            .expect("failed to hash the test password");
        let user = store
            .insert_user(&profile, None, password_hash)
            .await
            .expect("failed to store test user");

        Self {
            user_id: user.id,
            first_name,
            last_name,
            email,
            password,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub test_user: TestUser,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn get_html(&self, path: &str) -> String {
        self.get(path).await.text().await.unwrap()
    }

    pub async fn post_form<Body>(
        &self,
        path: &str,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .form(body)
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn login(&self) -> reqwest::Response {
        self.post_form(
            "/users/login",
            &serde_json::json!({
                "email": &self.test_user.email,
                "password": &self.test_user.password,
            }),
        )
        .await
    }

    pub async fn create_subscriber(&self, name: &str, email: &str) -> Uuid {
        let response = self
            .post_form(
                "/subscribers/create",
                &serde_json::json!({
                    "name": name,
                    "email": email,
                    "zipCode": "10016",
                }),
            )
            .await;
        assert_is_redirect_to(&response, "/subscribers");

        self.store
            .find_subscriber_by_email(email)
            .await
            .unwrap()
            .expect("subscriber was not stored")
            .id
    }

    pub async fn create_course(&self, title: &str) -> Uuid {
        let response = self
            .post_form(
                "/courses/create",
                &serde_json::json!({
                    "title": title,
                    "description": "Hands-on cooking class",
                    "maxStudents": "10",
                    "cost": "25",
                }),
            )
            .await;
        assert_is_redirect_to(&response, "/courses");

        self.store
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.title == title)
            .expect("course was not stored")
            .id
    }
}

/// Launches the application in the background on a random port, backed by a
/// fresh in-memory store holding a single test user.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|store| store).await
}

/// Same as [`spawn_app`], but every subscriber lookup by email fails.
pub async fn spawn_app_with_failing_subscriber_lookup() -> TestApp {
    spawn_app_with(|store| {
        Arc::new(FailingSubscriberLookup(store)) as Arc<dyn Store>
    })
    .await
}

async fn spawn_app_with<F>(wrap_store: F) -> TestApp
where
    F: FnOnce(Arc<dyn Store>) -> Arc<dyn Store>,
{
    Lazy::force(&TRACING);

    let config = {
        let mut c = get_config().expect("failed to read configuration");
        c.application.port = 0;
        c
    };

    let store = Arc::new(InMemoryStore::new());
    let test_user = TestUser::store(&store).await;

    let application = Application::build_with_store(
        config.application,
        wrap_store(store.clone() as Arc<dyn Store>),
    )
    .expect("failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address,
        store,
        test_user,
        api_client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Delegates to the wrapped store, except that `find_subscriber_by_email`
/// always errors.
struct FailingSubscriberLookup(Arc<dyn Store>);

#[async_trait]
impl SubscriberStore for FailingSubscriberLookup {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        self.0.list_subscribers().await
    }

    async fn find_subscriber(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscriber>, StoreError> {
        self.0.find_subscriber(id).await
    }

    async fn find_subscriber_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<Subscriber>, StoreError> {
        Err(anyhow::anyhow!("connection reset by peer").into())
    }

    async fn insert_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<Subscriber, StoreError> {
        self.0.insert_subscriber(subscriber).await
    }

    async fn update_subscriber(
        &self,
        id: Uuid,
        subscriber: &NewSubscriber,
    ) -> Result<Option<Subscriber>, StoreError> {
        self.0.update_subscriber(id, subscriber).await
    }

    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, StoreError> {
        self.0.delete_subscriber(id).await
    }
}

#[async_trait]
impl UserStore for FailingSubscriberLookup {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.0.list_users().await
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.0.find_user(id).await
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        self.0.find_user_by_email(email).await
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Uuid, Secret<String>)>, StoreError> {
        self.0.find_credentials(email).await
    }

    async fn insert_user(
        &self,
        profile: &UserChanges,
        subscribed_account: Option<Uuid>,
        password_hash: Secret<String>,
    ) -> Result<User, StoreError> {
        self.0
            .insert_user(profile, subscribed_account, password_hash)
            .await
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        self.0.update_user(id, changes).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        self.0.delete_user(id).await
    }

    async fn enroll_user(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<User>, StoreError> {
        self.0.enroll_user(user_id, course_id).await
    }
}

#[async_trait]
impl CourseStore for FailingSubscriberLookup {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        self.0.list_courses().await
    }

    async fn find_course(
        &self,
        id: Uuid,
    ) -> Result<Option<Course>, StoreError> {
        self.0.find_course(id).await
    }

    async fn insert_course(
        &self,
        course: &NewCourse,
    ) -> Result<Course, StoreError> {
        self.0.insert_course(course).await
    }

    async fn update_course(
        &self,
        id: Uuid,
        course: &NewCourse,
    ) -> Result<Option<Course>, StoreError> {
        self.0.update_course(id, course).await
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError> {
        self.0.delete_course(id).await
    }
}

use std::net::TcpListener;
use std::sync::Arc;

use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{time::Duration, Key};
use actix_web::dev::Server;
use actix_web::{guard, web, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_lab::middleware::from_fn;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::authentication::reject_anonymous_users;
use crate::configuration::{ApplicationSettings, DatabaseSettings, Settings};
use crate::method_override::method_override;
use crate::routes::{
    courses, health, home, not_found, render_error_pages, subscribers, users,
    AppError,
};
use crate::store::{PostgresStore, Store};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Connects to Postgres, applies pending migrations and binds the
    /// listener.
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let pool = get_connection_pool(&config.database);
        sqlx::migrate!("./migrations").run(&pool).await?;

        let store: Arc<dyn Store> = Arc::new(PostgresStore::new(pool));
        Self::build_with_store(config.application, store)
    }

    /// Same as [`Application::build`] with an already constructed store.
    pub fn build_with_store(
        config: ApplicationSettings,
        store: Arc<dyn Store>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!("listening on port {}", port);

        let server = run(
            listener,
            store,
            config.hmac_secret,
            config.session_ttl_milliseconds,
            config.secure_cookies,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.with_db())
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn Store>,
    hmac_secret: Secret<String>,
    session_ttl_milliseconds: i64,
    secure_cookies: bool,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn Store> = web::Data::from(store);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework =
        FlashMessagesFramework::builder(message_store).build();

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(secure_cookies)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::milliseconds(
                session_ttl_milliseconds,
            )),
        )
        .build();

        App::new()
            .wrap(from_fn(render_error_pages))
            .wrap(message_framework.clone())
            .wrap(session)
            .wrap(from_fn(method_override))
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health", web::get().to(health))
            .service(subscriber_routes())
            .service(user_routes())
            .service(course_routes())
            .default_service(web::route().to(not_found))
            .app_data(store.clone())
            .app_data(
                web::PathConfig::default()
                    .error_handler(|_, _| AppError::NotFound.into()),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn subscriber_routes() -> actix_web::Scope {
    web::scope("/subscribers")
        .route("", web::get().to(subscribers::index))
        .route("/new", web::get().to(subscribers::new))
        .route("/create", web::post().to(subscribers::create))
        .route("/{id}", web::get().to(subscribers::show))
        .route("/{id}/edit", web::get().to(subscribers::edit))
        .route("/{id}/update", web::put().to(subscribers::update))
        .route("/{id}/delete", web::delete().to(subscribers::delete))
}

// Static segments are registered ahead of `/{id}`. Guarded resources only
// match their own method; anything else falls through to `not_found`.
fn user_routes() -> actix_web::Scope {
    web::scope("/users")
        .route("", web::get().to(users::index))
        .route("/new", web::get().to(users::new))
        .route("/create", web::post().to(users::create))
        .route("/login", web::get().to(users::login))
        .route("/login", web::post().to(users::authenticate))
        .route("/logout", web::get().to(users::logout))
        .route("/{id}", web::get().to(users::show))
        .service(
            web::resource("/{id}/edit")
                .guard(guard::Get())
                .wrap(from_fn(reject_anonymous_users))
                .route(web::get().to(users::edit)),
        )
        .service(
            web::resource("/{id}/update")
                .guard(guard::Put())
                .wrap(from_fn(reject_anonymous_users))
                .route(web::put().to(users::update)),
        )
        .service(
            web::resource("/{id}/delete")
                .guard(guard::Delete())
                .wrap(from_fn(reject_anonymous_users))
                .route(web::delete().to(users::delete)),
        )
}

fn course_routes() -> actix_web::Scope {
    web::scope("/courses")
        .route("", web::get().to(courses::index))
        .route("/new", web::get().to(courses::new))
        .route("/create", web::post().to(courses::create))
        .route("/{id}", web::get().to(courses::show))
        .route("/{id}/edit", web::get().to(courses::edit))
        .route("/{id}/update", web::put().to(courses::update))
        .route("/{id}/delete", web::delete().to(courses::delete))
        .service(
            web::resource("/{id}/join")
                .guard(guard::Post())
                .wrap(from_fn(reject_anonymous_users))
                .route(web::post().to(courses::join)),
        )
}

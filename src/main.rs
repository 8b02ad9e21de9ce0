//! Herald server binary.
//!
//! Wires the content store, the conversation engine and the LINE webhook
//! into a single axum application.

use std::sync::Arc;

use axum::Router;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herald::adapters::http::{
    announcement_routes, category_routes, AnnouncementHandlers, CategoryHandlers,
};
use herald::adapters::line::{line_routes, LineClient, WebhookState};
use herald::adapters::postgres::{PostgresAnnouncementRepository, PostgresCategoryRepository};
use herald::adapters::redis::RedisStateRepository;
use herald::application::bot::{AnnouncementBotService, BotHub, BotService, ServiceRegistry};
use herald::config::AppConfig;
use herald::ports::{AnnouncementRepository, CategoryRepository};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .expect("failed to connect to database");

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
    }

    let redis_client = redis::Client::open(config.redis.url.as_str()).expect("invalid redis url");
    let redis_conn = redis_client
        .get_multiplexed_tokio_connection()
        .await
        .expect("failed to connect to redis");

    let categories: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let announcements: Arc<dyn AnnouncementRepository> =
        Arc::new(PostgresAnnouncementRepository::new(pool));
    let states = Arc::new(RedisStateRepository::new(
        redis_conn,
        config.redis.state_ttl_secs,
    ));

    let announcement_service: Arc<dyn BotService> = Arc::new(AnnouncementBotService::new(
        announcements.clone(),
        categories.clone(),
    ));
    let registry = ServiceRegistry::new(vec![announcement_service])
        .expect("duplicate bot service identifier");

    let transport = Arc::new(LineClient::new(
        reqwest::Client::new(),
        SecretString::new(config.line.channel_token.clone()),
    ));
    let hub = Arc::new(BotHub::new(Arc::new(registry), states, transport));

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    let app = Router::new()
        .nest(
            "/api/categories",
            category_routes(CategoryHandlers::new(categories.clone())),
        )
        .nest(
            "/api/announcements",
            announcement_routes(AnnouncementHandlers::new(announcements, categories)),
        )
        .merge(line_routes(WebhookState::new(
            hub,
            SecretString::new(config.line.channel_secret.clone()),
        )))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors);

    let addr = config.server.socket_addr().expect("invalid bind address");
    tracing::info!(%addr, "herald listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}

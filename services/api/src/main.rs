use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use snapchef_api::config::ApiConfig;
use snapchef_api::infra::cache::RedisCache;
use snapchef_api::router::build_router;
use snapchef_api::state::AppState;
use snapchef_auth_types::identity::TokenSecret;
use snapchef_core::tracing::init_tracing;
use snapchef_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let cache = match config.redis_url() {
        Some(url) => {
            let pool = deadpool_redis::Config::from_url(url)
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .expect("failed to create Redis pool");
            RedisCache {
                pool: Some(pool),
                ttl_secs: config.cache_ttl_secs,
            }
        }
        None => {
            warn!("REDIS_HOST not set, recipe cache disabled");
            RedisCache::disabled()
        }
    };

    let state = AppState {
        db,
        cache,
        token_secret: TokenSecret::new(config.jwt_secret),
        access_ttl_secs: config.access_ttl_secs,
        refresh_ttl_secs: config.refresh_ttl_secs,
        max_page_size: config.max_page_size,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.app_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("snapchef listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

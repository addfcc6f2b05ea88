//! Tokengate server entry point
//!
//! Wires the concrete infrastructure (MySQL users, Redis denylist, bcrypt)
//! into the core services and serves the HTTP surface.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use sqlx::mysql::MySqlPoolOptions;

use tg_api::app::create_app;
use tg_api::middleware::rate_limit::{InMemoryRateLimiter, RateLimit};
use tg_api::routes::auth::AppState;
use tg_core::services::{AuthService, Rs256KeyManager, SessionService, TokenIssuer, TokenIssuerConfig};
use tg_infra::cache::{RedisClient, RedisRevocationStore};
use tg_infra::database::MySqlUserStore;
use tg_infra::security::BcryptHasher;
use tg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!("Starting Tokengate API server");

    // Signing keys are loaded once, before anything binds.
    let key_manager = Rs256KeyManager::new(
        &config.jwt.private_key_path,
        &config.jwt.public_key_path,
    )
    .context("loading RSA keypair")?;
    let issuer = Arc::new(TokenIssuer::new(
        key_manager,
        TokenIssuerConfig::from(&config.jwt),
    ));

    let pool = MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&config.server.database_url)
        .await
        .context("connecting to MySQL")?;
    let users = Arc::new(MySqlUserStore::new(pool));

    let redis = RedisClient::new(&config.cache)
        .await
        .context("connecting to Redis")?;
    let revocations = Arc::new(RedisRevocationStore::covering_lifetimes(
        redis,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let hasher = Arc::new(BcryptHasher::new());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&issuer),
        Arc::clone(&users),
        Arc::clone(&revocations),
        hasher,
    ));
    let session_service = Arc::new(SessionService::new(issuer, users, revocations));

    // One limiter shared by every worker.
    let limiter = Arc::new(InMemoryRateLimiter::new(&config.rate_limit));
    let rate_limit_enabled = config.rate_limit.enabled;

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Binding to {}", bind_address);

    let session_config = config.session.clone();
    let jwt_config = config.jwt.clone();

    let mut server = HttpServer::new(move || {
        let app_state = web::Data::new(AppState {
            auth_service: Arc::clone(&auth_service),
            session_service: Arc::clone(&session_service),
            session_config: session_config.clone(),
            jwt_config: jwt_config.clone(),
        });

        create_app(
            app_state,
            RateLimit::with_limiter(Arc::clone(&limiter), rate_limit_enabled),
        )
    })
    .bind(&bind_address)
    .with_context(|| format!("binding {}", bind_address))?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await.context("running HTTP server")
}

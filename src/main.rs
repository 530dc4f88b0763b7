//! Sealbio Service binary.
//!
//! Loads configuration from the environment, runs pending migrations, and
//! serves the HTTP API.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sealbio_service::api::{build_router, AppState};
use sealbio_service::config::AppConfig;
use sealbio_service::database::UserStore;
use sealbio_service::service::{AuthService, ProfileService, SealService, TokenService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;

    log::info!("Connecting to database");
    let pool = config.database.create_pool().await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations applied");

    let store = UserStore::new(pool);
    let tokens = Arc::new(TokenService::new(config.jwt_secret.clone()));
    let state = AppState {
        auth: Arc::new(AuthService::new(store.clone(), (*tokens).clone())),
        profiles: Arc::new(ProfileService::new(store.clone())),
        seals: Arc::new(SealService::new(store, config.seal_mode)),
    };

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
    if !config.server.allowed_origins.is_empty() {
        let origins = config
            .server
            .allowed_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        cors = cors.allow_origin(origins).allow_credentials(true);
    }

    let app = build_router(state, tokens)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let address = config.server.bind_address();
    log::info!(
        "Listening on {} (seal mode: {:?})",
        address,
        config.seal_mode
    );

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

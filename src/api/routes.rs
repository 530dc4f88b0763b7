//! API Routes
//!
//! Route table and router assembly. Protected routes sit behind the bearer
//! auth middleware; seal creation uses the optional variant so the service
//! layer can apply the configured trust model.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::handlers::{self, AppState};
use crate::api::middleware::{auth_middleware, optional_auth_middleware};
use crate::service::TokenService;

/// Assemble the application router
pub fn build_router(state: AppState, tokens: Arc<TokenService>) -> Router {
    let protected = Router::new()
        .route(
            "/api/profile",
            get(handlers::get_own_profile)
                .put(handlers::update_profile)
                .delete(handlers::delete_account),
        )
        .route("/api/seals/:id/confirm", post(handlers::confirm_seal))
        .layer(from_fn_with_state(tokens.clone(), auth_middleware));

    let seals = Router::new()
        .route("/api/seals", post(handlers::create_seal))
        .layer(from_fn_with_state(tokens, optional_auth_middleware));

    Router::new()
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/:username", get(handlers::get_profile))
        .route("/api/health", get(handlers::health_check))
        .merge(protected)
        .merge(seals)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": {
                "code": "NOT_FOUND",
                "message": "Route not found"
            }
        })),
    )
}

//! HTTP Handlers
//!
//! Thin translation layer between the HTTP surface and the services. Every
//! successful response is wrapped in the `{ success: true, data }` envelope;
//! failures render through [`AppError`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::api::middleware::AuthUser;
use crate::models::requests::{
    DeleteAccountResponse, HealthCheckResponse, SealRequest, SignInRequest, SignupRequest,
    UpdateProfileRequest,
};
use crate::service::{AuthService, ProfileService, SealService};
use crate::utils::error::AppResult;

/// Shared handler state holding the service layer
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub seals: Arc<SealService>,
}

/// Success envelope wrapping every 2xx payload
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<Response> {
    let response = state.auth.signup(request).await?;
    Ok((StatusCode::CREATED, SuccessResponse::new(response)).into_response())
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state.auth.login(request).await?;
    Ok(SuccessResponse::new(response))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.profiles.list_all().await?;
    Ok(SuccessResponse::new(users))
}

/// GET /api/users/:username
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile = state.profiles.get(&username).await?;
    Ok(SuccessResponse::new(profile))
}

/// GET /api/profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(AuthUser(session)): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    let user = state.profiles.get_own(&session).await?;
    Ok(SuccessResponse::new(user))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(AuthUser(session)): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.profiles.update(&session, request).await?;
    Ok(SuccessResponse::new(user))
}

/// DELETE /api/profile
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(AuthUser(session)): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    state.profiles.delete(&session).await?;
    Ok(SuccessResponse::new(DeleteAccountResponse {
        message: "Account deleted".to_string(),
    }))
}

/// POST /api/seals
pub async fn create_seal(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(request): Json<SealRequest>,
) -> AppResult<Response> {
    let session = auth.as_ref().map(|Extension(AuthUser(session))| session);
    let experience = state.seals.request_seal(session, request).await?;
    Ok((StatusCode::CREATED, SuccessResponse::new(experience)).into_response())
}

/// POST /api/seals/:id/confirm
pub async fn confirm_seal(
    State(state): State<AppState>,
    Extension(AuthUser(session)): Extension<AuthUser>,
    Path(experience_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let experience = state.seals.confirm_seal(&session, experience_id).await?;
    Ok(SuccessResponse::new(experience))
}

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    SuccessResponse::new(HealthCheckResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = SuccessResponse::new(serde_json::json!({"value": 42}));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["value"], 42);
        assert!(json.get("error").is_none());
    }
}

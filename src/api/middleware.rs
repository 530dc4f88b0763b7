//! Authentication Middleware
//!
//! Bearer-token extraction and verification for protected routes. Verified
//! sessions are made available to handlers through request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::models::auth::SessionContext;
use crate::service::token::TokenService;
use crate::utils::error::AppError;

/// Verified session attached to authenticated requests
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionContext);

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Require a valid bearer token; rejects the request otherwise
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

    let session = tokens.verify(token)?;
    request.extensions_mut().insert(AuthUser(session));

    Ok(next.run(request).await)
}

/// Attach a session when a valid bearer token is present, but let
/// unauthenticated requests through. Invalid tokens are still rejected so a
/// caller is never silently downgraded to anonymous.
pub async fn optional_auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(&request) {
        let session = tokens.verify(token)?;
        request.extensions_mut().insert(AuthUser(session));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new("test_signing_secret".to_string()))
    }

    async fn whoami(auth: Option<Extension<AuthUser>>) -> String {
        match auth {
            Some(Extension(AuthUser(session))) => session.username,
            None => "anonymous".to_string(),
        }
    }

    fn protected_app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(tokens, auth_middleware))
    }

    fn optional_app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(tokens, optional_auth_middleware))
    }

    fn request(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let tokens = tokens();
        let token = tokens.issue(Uuid::new_v4(), "alice").unwrap();

        let response = protected_app(tokens)
            .oneshot(request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let response = protected_app(tokens()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let response = protected_app(tokens())
            .oneshot(request(Some("not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_authorization_header_rejected() {
        let response = protected_app(tokens())
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, "Basic abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_optional_allows_anonymous() {
        let response = optional_app(tokens()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_optional_still_rejects_bad_token() {
        let response = optional_app(tokens())
            .oneshot(request(Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

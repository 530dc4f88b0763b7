//! Session Token Service
//!
//! Issues and verifies the signed, time-limited session tokens that carry
//! user identity. Tokens are stateless JWTs; there is no server-side
//! session storage or revocation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::models::auth::{SessionClaims, SessionContext};
use crate::utils::error::{AppError, AppResult};

/// Token issuer/verifier bound to the process-wide signing secret
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a signed session token binding the user's id and username.
    ///
    /// Fails closed with a configuration error when no signing secret is
    /// set; there is no default secret.
    pub fn issue(&self, user_id: Uuid, username: &str) -> AppResult<String> {
        let key = self.encoding_key()?;
        let claims = SessionClaims::new(user_id, username, Utc::now());

        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Verify a token's signature and expiration, returning the session
    /// context on success.
    pub fn verify(&self, token: &str) -> AppResult<SessionContext> {
        if self.secret.is_empty() {
            return Err(AppError::Configuration(
                "JWT_SECRET is not configured".to_string(),
            ));
        }

        let validation = Validation::new(Algorithm::HS256);
        let key = DecodingKey::from_secret(self.secret.as_bytes());

        let claims = decode::<SessionClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        SessionContext::from_claims(&claims)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))
    }

    fn encoding_key(&self) -> AppResult<EncodingKey> {
        if self.secret.is_empty() {
            return Err(AppError::Configuration(
                "JWT_SECRET is not configured".to_string(),
            ));
        }
        Ok(EncodingKey::from_secret(self.secret.as_bytes()))
    }
}

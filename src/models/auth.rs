//! Authentication Models
//!
//! Data structures for the signed, stateless session tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// Validity window for session tokens
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// JWT claims for a session token.
///
/// Sessions are stateless: validity is purely the signature plus the
/// expiration window. There is no server-side revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: String,

    /// Username bound to the session
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), exactly 7 days after issuance
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user, expiring [`TOKEN_VALIDITY_DAYS`] after `issued_at`
    pub fn new(user_id: Uuid, username: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        }
    }
}

/// Authenticated session context extracted from a verified token
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// User ID extracted from the token subject
    pub user_id: Uuid,

    /// Username bound to the session
    pub username: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl SessionContext {
    /// Build a session context from verified claims
    pub fn from_claims(claims: &SessionClaims) -> Result<Self, uuid::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub)?,
            username: claims.username.clone(),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }
}

/// Response payload for successful signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Sanitized user record (credential stripped)
    pub user: User,

    /// Signed session token for subsequent requests
    pub token: String,
}

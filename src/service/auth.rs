//! Authentication Service
//!
//! Orchestrates signup and login against the credential store and the
//! token service, producing a session token bound to a user identity.

use uuid::Uuid;
use validator::Validate;

use crate::database::store::{SealVisibility, UserStore};
use crate::models::auth::AuthResponse;
use crate::models::requests::{SignInRequest, SignupRequest};
use crate::models::user::{AccountKind, NewUser};
use crate::service::token::TokenService;
use crate::utils::error::{AppError, AppResult};
use crate::utils::security::{hash_password, verify_password};
use crate::utils::validation::validation_error;

/// Default bio for freshly created accounts
const DEFAULT_BIO: &str = "Welcome to my bio profile!";

/// Authentication service over the user record store and token issuer
#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(store: UserStore, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Create a new account and issue a session token.
    ///
    /// The returned user is sanitized; the password credential never leaves
    /// the service layer.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(validation_error)?;

        let username = request.username.trim().to_string();

        if self
            .store
            .find_by_username(&username, SealVisibility::VerifiedOnly)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let user = NewUser {
            id: Uuid::new_v4(),
            username: username.clone(),
            password_hash: Some(hash_password(&request.password)),
            account_kind: request.account_type,
            display_name: username.clone(),
            bio: DEFAULT_BIO.to_string(),
            avatar_url: default_avatar_url(&username, request.account_type),
        };

        self.store.create(&user).await?;

        let record = self
            .store
            .find_by_id(user.id, SealVisibility::IncludePending)
            .await?
            .ok_or_else(|| AppError::Internal("User vanished after creation".to_string()))?;

        let token = self.tokens.issue(record.id, &record.username)?;

        log::info!("Account created: {} ({})", record.username, record.id);

        Ok(AuthResponse {
            user: record.into(),
            token,
        })
    }

    /// Authenticate an existing account and issue a fresh session token.
    ///
    /// Stored credentials of both shapes are accepted: the deprecated
    /// `hashed_<password>` convention and the salted-hash format.
    pub async fn login(&self, request: SignInRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(validation_error)?;

        let username = request.username.trim();

        let record = self
            .store
            .find_by_username(username, SealVisibility::VerifiedOnly)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let stored = record
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(&request.password, stored) {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.tokens.issue(record.id, &record.username)?;

        Ok(AuthResponse {
            user: record.into(),
            token,
        })
    }
}

/// Deterministic avatar for a new account, seeded by username.
///
/// Organization accounts get the abstract icon style; people get portraits.
fn default_avatar_url(username: &str, kind: AccountKind) -> String {
    let style = match kind {
        AccountKind::Person => "lorelei",
        AccountKind::Company | AccountKind::Institution => "icons",
    };
    format!("https://api.dicebear.com/8.x/{}/svg?seed={}", style, username)
}

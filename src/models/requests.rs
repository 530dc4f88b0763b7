//! Request and Response Models
//!
//! Data structures for API request and response payloads with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{AccountKind, SocialLinks};
use crate::utils::validation::{url_validator, username_validator};

/// Request payload for creating a new account
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Unique public handle (3-20 characters, letters/digits/underscores)
    #[validate(custom(function = "username_validator"))]
    pub username: String,

    /// Password (8-128 characters)
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    /// Kind of account being created
    pub account_type: AccountKind,
}

/// Request payload for logging in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request payload for updating the caller's profile.
///
/// Only provided fields are applied. A provided `links` object replaces the
/// entire stored link set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 160, message = "Bio must be 160 characters or less"))]
    pub bio: Option<String>,

    #[validate(custom(function = "url_validator"))]
    pub avatar_url: Option<String>,

    #[validate(nested)]
    pub links: Option<SocialLinks>,
}

/// Request payload for creating or requesting a seal
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SealRequest {
    /// Username of the person whose profile receives the seal
    #[validate(length(min = 1, message = "Target user handle is required"))]
    pub person_handle: String,

    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,

    #[validate(length(min = 1, max = 50, message = "Period is required"))]
    pub period: String,

    #[validate(length(max = 280, message = "Description must be 280 characters or less"))]
    pub description: Option<String>,
}

/// Response for account deletion
#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub message: String,
}

/// Response for health check
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

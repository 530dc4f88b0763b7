//! User Model
//!
//! Core user, profile, and experience (seal) data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::url_validator;

/// Closed category of an account, governing sealing permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Person,
    Company,
    Institution,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Person => "person",
            AccountKind::Company => "company",
            AccountKind::Institution => "institution",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "person" => Some(AccountKind::Person),
            "company" => Some(AccountKind::Company),
            "institution" => Some(AccountKind::Institution),
            _ => None,
        }
    }
}

/// Verification status of an experience seal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SealStatus {
    Pending,
    Verified,
}

impl SealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SealStatus::Pending => "pending",
            SealStatus::Verified => "verified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(SealStatus::Pending),
            "verified" => Some(SealStatus::Verified),
            _ => None,
        }
    }
}

/// Named social links with a fixed key set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SocialLinks {
    #[validate(custom(function = "url_validator"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[validate(custom(function = "url_validator"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    #[validate(custom(function = "url_validator"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[validate(custom(function = "url_validator"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// Iterate the populated links as (key, url) pairs in a fixed order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("website", &self.website),
            ("github", &self.github),
            ("twitter", &self.twitter),
            ("linkedin", &self.linkedin),
        ]
        .into_iter()
        .filter_map(|(key, url)| url.as_deref().map(|u| (key, u)))
        .collect()
    }

    /// Build from stored (key, url) rows, ignoring unknown keys
    pub fn from_entries<'a>(rows: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let mut links = SocialLinks::default();
        for (key, url) in rows {
            match key {
                "website" => links.website = Some(url),
                "github" => links.github = Some(url),
                "twitter" => links.twitter = Some(url),
                "linkedin" => links.linkedin = Some(url),
                _ => {}
            }
        }
        links
    }
}

/// A work-experience claim sealed onto a person's profile.
///
/// Issuer identity is captured by value at issuance and is not live-updated
/// if the issuer later renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Unique identifier for the seal
    pub id: Uuid,

    /// Role title claimed by the seal
    pub role: String,

    /// Free-text period, e.g. "2023-2024"
    pub period: String,

    /// Optional description of the work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Issuer identifier at time of issuance
    pub sealed_by_org_id: String,

    /// Issuer display name at time of issuance
    pub sealed_by_org_name: String,

    /// Issuer avatar at time of issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sealed_by_org_avatar_url: Option<String>,

    /// Pending until confirmed by the profile owner; terminal once verified
    pub status: SealStatus,

    /// Timestamp of issuance
    pub sealed_at: DateTime<Utc>,
}

/// Internal user representation including the password credential.
///
/// Never exposed in API responses; convert to [`User`] or [`Profile`] first.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Stored credential string; absent for externally-authenticated accounts
    pub password_hash: Option<String>,
    pub account_kind: AccountKind,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: SocialLinks,
    pub experiences: Vec<Experience>,
    pub created_at: DateTime<Utc>,
}

/// Sanitized user representation for API responses.
///
/// The conversion from [`UserRecord`] strips the password credential so it
/// is never accidentally exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub account_kind: AccountKind,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: SocialLinks,
    pub experiences: Vec<Experience>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            account_kind: record.account_kind,
            display_name: record.display_name,
            bio: record.bio,
            avatar_url: record.avatar_url,
            links: record.links,
            experiences: record.experiences,
            created_at: record.created_at,
        }
    }
}

/// Publicly visible profile projection of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub links: SocialLinks,
    pub account_kind: AccountKind,
    pub experiences: Vec<Experience>,
}

impl From<UserRecord> for Profile {
    fn from(record: UserRecord) -> Self {
        Profile {
            username: record.username,
            display_name: record.display_name,
            avatar_url: record.avatar_url,
            bio: record.bio,
            links: record.links,
            account_kind: record.account_kind,
            experiences: record.experiences,
        }
    }
}

/// Fields required to create a user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
    pub account_kind: AccountKind,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
}

/// Fields required to append an experience seal to a user record
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub role: String,
    pub period: String,
    pub description: Option<String>,
    pub sealed_by_org_id: String,
    pub sealed_by_org_name: String,
    pub sealed_by_org_avatar_url: Option<String>,
    pub status: SealStatus,
}

/// Partial profile update; only provided fields are applied.
///
/// A provided link set replaces all stored links.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub links: Option<SocialLinks>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
            && self.links.is_none()
    }
}

//! Data models and request/response structures

pub mod auth;
pub mod requests;
pub mod user;

pub use auth::{AuthResponse, SessionClaims, SessionContext, TOKEN_VALIDITY_DAYS};
pub use user::{
    AccountKind, Experience, NewExperience, NewUser, Profile, ProfileChanges, SealStatus,
    SocialLinks, User, UserRecord,
};

//! Business logic services: authentication, tokens, profiles, and seals

pub mod auth;
pub mod profile;
pub mod seal;
pub mod token;

pub use auth::AuthService;
pub use profile::ProfileService;
pub use seal::{SealMode, SealService};
pub use token::TokenService;

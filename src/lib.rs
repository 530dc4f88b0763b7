//! # Sealbio Service
//!
//! A bio-profile platform where organizations seal (attest to) work
//! experience on personal profiles.
//!
//! ## Features
//!
//! - Username/password accounts for people, companies, and institutions
//! - Stateless JWT sessions with a seven-day validity window
//! - Public bio profiles with display name, bio, avatar, and social links
//! - Experience seals issued by companies, confirmed by the profile owner
//! - Configurable trust model: authorized (production) or open (demo)
//!
//! ## Architecture
//!
//! - `api` - HTTP handlers, routes, and auth middleware (Axum)
//! - `service` - business logic: auth, tokens, profiles, seals
//! - `database` - PostgreSQL persistence via SQLx
//! - `models` - domain and wire types
//! - `config` - environment-driven configuration
//! - `utils` - errors, password hashing, validation

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod service;
pub mod utils;

pub use api::{build_router, AppState};
pub use config::AppConfig;
pub use database::{DatabasePool, UserStore};
pub use service::{AuthService, ProfileService, SealMode, SealService, TokenService};
pub use utils::error::{AppError, AppResult};

/// Crate version reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

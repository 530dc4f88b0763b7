//! Database connection management and the user record store

pub mod connection;
pub mod store;

pub use connection::{DatabaseConfig, DatabasePool};
pub use store::{SealVisibility, UserStore};

//! HTTP API layer: handlers, routes, and authentication middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use middleware::AuthUser;
pub use routes::build_router;

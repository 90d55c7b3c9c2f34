//! Storefront service
//!
//! Serves the product search proxy and the credentials sign-in flow in front
//! of the remote catalog and auth services.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;

//! Storefront data model

pub mod product;
pub mod query;
pub mod session;

// Re-export for convenience
pub use product::{Product, ProductOwner};
pub use query::{Category, SearchQuery, Take};
pub use session::{SessionIdentity, SessionUser, SessionView};

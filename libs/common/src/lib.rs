//! Common library for the storefront workspace
//!
//! This crate provides the pieces shared by the storefront service and the
//! search client: the product/session data model, the upstream error
//! taxonomy and settings loading.

pub mod config;
pub mod error;
pub mod models;

pub use crate::config::Settings;
pub use crate::error::{ConfigError, UpstreamError};

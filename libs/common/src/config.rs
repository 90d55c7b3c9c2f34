//! Settings shared by the storefront binaries
//!
//! Values are resolved once at startup: built-in defaults first, then any
//! `STOREFRONT_*` environment variable on top.

use std::fmt;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// Prefix of every environment variable read by [`Settings::from_env`]
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Runtime settings
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Base URL of the remote product catalog (`.../api/Product`)
    pub catalog_base_url: String,
    /// Base URL of the remote auth service (`.../api/Auth`)
    pub auth_base_url: String,
    /// Path sign-in failures are redirected to
    pub sign_in_page: String,
    /// HMAC secret for session cookies
    pub session_secret: String,
    /// Session lifetime in seconds (default: 30 days)
    pub session_ttl_secs: u64,
    /// Per-request timeout for upstream calls
    pub upstream_timeout_secs: u64,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// # Environment Variables
    /// - `STOREFRONT_BIND_ADDR` (default: `0.0.0.0:3000`)
    /// - `STOREFRONT_CATALOG_BASE_URL` (default: `http://localhost:5113/api/Product`)
    /// - `STOREFRONT_AUTH_BASE_URL` (default: `http://localhost:5113/api/Auth`)
    /// - `STOREFRONT_SIGN_IN_PAGE` (default: `/auth/login`)
    /// - `STOREFRONT_SESSION_SECRET` (required)
    /// - `STOREFRONT_SESSION_TTL_SECS` (default: 2592000)
    /// - `STOREFRONT_UPSTREAM_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit environment source
    pub fn from_source(source: Environment) -> ConfigResult<Self> {
        let settings: Settings = Config::builder()
            .set_default("bind_addr", "0.0.0.0:3000")?
            .set_default("catalog_base_url", "http://localhost:5113/api/Product")?
            .set_default("auth_base_url", "http://localhost:5113/api/Auth")?
            .set_default("sign_in_page", "/auth/login")?
            .set_default("session_ttl_secs", 2_592_000_i64)?
            .set_default("upstream_timeout_secs", 30_i64)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let settings = settings.normalized()?;
        info!(
            catalog = %settings.catalog_base_url,
            auth = %settings.auth_base_url,
            "Settings loaded"
        );
        Ok(settings)
    }

    fn normalized(mut self) -> ConfigResult<Self> {
        if self.session_secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "session_secret",
                reason: "must not be empty".to_string(),
            });
        }

        if !self.sign_in_page.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "sign_in_page",
                reason: "must be an absolute path".to_string(),
            });
        }

        self.catalog_base_url = self.catalog_base_url.trim_end_matches('/').to_string();
        self.auth_base_url = self.auth_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Remote catalog search endpoint
    pub fn catalog_search_url(&self) -> String {
        format!("{}/search", self.catalog_base_url)
    }

    /// Remote login endpoint
    pub fn auth_login_url(&self) -> String {
        format!("{}/Login", self.auth_base_url)
    }

    /// Upstream request timeout
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field("sign_in_page", &self.sign_in_page)
            .field("session_secret", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults_with_secret() {
        let settings = Settings::from_source(source(&[("STOREFRONT_SESSION_SECRET", "s3cret")]))
            .unwrap();

        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
        assert_eq!(
            settings.catalog_search_url(),
            "http://localhost:5113/api/Product/search"
        );
        assert_eq!(settings.auth_login_url(), "http://localhost:5113/api/Auth/Login");
        assert_eq!(settings.sign_in_page, "/auth/login");
        assert_eq!(settings.session_ttl_secs, 2_592_000);
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = Settings::from_source(source(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let result = Settings::from_source(source(&[("STOREFRONT_SESSION_SECRET", "  ")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "session_secret",
                ..
            })
        ));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let settings = Settings::from_source(source(&[
            ("STOREFRONT_SESSION_SECRET", "s3cret"),
            ("STOREFRONT_CATALOG_BASE_URL", "http://catalog.internal/api/Product/"),
            ("STOREFRONT_SESSION_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(
            settings.catalog_search_url(),
            "http://catalog.internal/api/Product/search"
        );
        assert_eq!(settings.session_ttl_secs, 60);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = Settings::from_source(source(&[("STOREFRONT_SESSION_SECRET", "s3cret")]))
            .unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        unsafe {
            std::env::set_var("STOREFRONT_SESSION_SECRET", "from-env");
            std::env::set_var("STOREFRONT_SIGN_IN_PAGE", "/signin");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.session_secret, "from-env");
        assert_eq!(settings.sign_in_page, "/signin");

        unsafe {
            std::env::remove_var("STOREFRONT_SESSION_SECRET");
            std::env::remove_var("STOREFRONT_SIGN_IN_PAGE");
        }
    }
}

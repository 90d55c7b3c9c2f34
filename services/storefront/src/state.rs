//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use common::Settings;

use crate::{auth::AuthClient, catalog::CatalogClient, session::SessionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: CatalogClient,
    pub auth: AuthClient,
    pub sessions: SessionService,
}

impl AppState {
    /// Build the upstream clients described by `settings`
    pub fn new(settings: Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.upstream_timeout())
            .build()?;

        Ok(AppState {
            catalog: CatalogClient::new(http.clone(), settings.catalog_search_url()),
            auth: AuthClient::new(http, settings.auth_login_url()),
            sessions: SessionService::from_settings(&settings),
            settings: Arc::new(settings),
        })
    }
}

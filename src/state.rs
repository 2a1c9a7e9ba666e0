use std::sync::Arc;

use crate::config::AppConfig;
use crate::pages::Pages;
use crate::upstream::{build_http_client, BackendClient};

/// Immutable per-process state, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// The dashboard backend.
    pub backend: BackendClient,
    /// This service's own public base URL, for server-side page fetches.
    pub internal: BackendClient,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http = build_http_client(&config.backend)?;
        let backend = BackendClient::new(&config.backend.api_url, http.clone())?;
        let internal = BackendClient::new(&config.server.base_url, http)?;
        let pages = Pages::new()?;

        Ok(Self {
            config: Arc::new(config),
            backend,
            internal,
            pages: Arc::new(pages),
        })
    }
}

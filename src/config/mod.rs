use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the upstream API, without a trailing slash.
    pub api_url: String,
    /// Outbound request timeout. `None` keeps the client default (no timeout).
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Public base URL of this service, used for server-side self fetches
    /// and the logout redirect.
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where an authenticated visitor of the login page is sent.
    pub landing_page: String,
    pub secure_cookies: bool,
    pub id_token_max_age_secs: i64,
    pub refresh_token_max_age_secs: i64,
}

const DEFAULT_API_URL: &str = "http://localhost:5556";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

impl AppConfig {
    pub fn from_env() -> Self {
        // APP_ENV wins; NODE_ENV is what the dashboard deployments already set
        let selector = env::var("APP_ENV").or_else(|_| env::var("NODE_ENV"));
        let environment = match selector.as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Backend overrides
        if let Ok(v) = env::var("NEXT_PUBLIC_API_URL") {
            self.backend.api_url = normalize_url("NEXT_PUBLIC_API_URL", &v, self.backend.api_url);
        }
        if let Ok(v) = env::var("BFF_BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = parse_timeout("BFF_BACKEND_TIMEOUT_SECS", &v, self.backend.timeout_secs);
        }

        // Server overrides
        if let Ok(v) = env::var("NEXT_PUBLIC_BASE_URL") {
            self.server.base_url = normalize_url("NEXT_PUBLIC_BASE_URL", &v, self.server.base_url);
        }
        if let Ok(v) = env::var("BFF_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Session overrides
        if let Ok(v) = env::var("BFF_LANDING_PAGE") {
            if v.starts_with('/') {
                self.session.landing_page = v;
            } else {
                tracing::warn!("BFF_LANDING_PAGE must be an absolute path, keeping {}", self.session.landing_page);
            }
        }
        if let Ok(v) = env::var("BFF_SECURE_COOKIES") {
            self.session.secure_cookies = v.parse().unwrap_or(self.session.secure_cookies);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                api_url: DEFAULT_API_URL.to_string(),
                timeout_secs: None,
            },
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                port: 3000,
            },
            session: SessionConfig {
                landing_page: "/config-user".to_string(),
                secure_cookies: false,
                id_token_max_age_secs: 60 * 60,            // 1 hour
                refresh_token_max_age_secs: 60 * 60 * 24 * 30, // 30 days
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            ..Self::development()
        }
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.session.secure_cookies = true;
        config
    }

    /// Same configuration pointed at another backend.
    pub fn with_backend_url(mut self, api_url: impl Into<String>) -> Self {
        self.backend.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Same configuration with another self base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.server.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

/// Validate an absolute http(s) URL and strip the trailing slash. Invalid
/// values are logged and the previous value is kept.
fn parse_timeout(key: &str, raw: &str, current: Option<u64>) -> Option<u64> {
    match raw.trim().parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            tracing::warn!("{} is not a number of seconds: '{}', keeping {:?}", key, raw, current);
            current
        }
    }
}

fn normalize_url(key: &str, raw: &str, current: String) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            url.as_str().trim_end_matches('/').to_string()
        }
        Ok(url) => {
            tracing::warn!("{key} has unsupported scheme {}, using {current}", url.scheme());
            current
        }
        Err(e) => {
            tracing::warn!("{key} is not a valid URL ({e}), using {current}");
            current
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

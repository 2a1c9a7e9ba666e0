//! Server-rendered dashboard pages.
//!
//! Templates are compiled once at startup into a minijinja environment held
//! in [`AppState`](crate::state::AppState). Pages that show backend data
//! fetch it server-side with the caller's credential; a backend 401 sends
//! the browser through `/api/auth/logout` so stale cookies are cleared.

pub mod account;
pub mod config_user;
pub mod dashboard;
pub mod whatsapp;

use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::Environment;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::SessionToken;
use crate::upstream::{BackendClient, Endpoint, UpstreamError};

pub const LOGOUT_ROUTE: &str = "/api/auth/logout";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("forgot_password.html", include_str!("../../templates/forgot_password.html")),
    ("change_password.html", include_str!("../../templates/change_password.html")),
    ("config_user.html", include_str!("../../templates/config_user.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("whatsapp_instances.html", include_str!("../../templates/whatsapp_instances.html")),
    ("whatsapp_groups.html", include_str!("../../templates/whatsapp_groups.html")),
    ("integration_wpp.html", include_str!("../../templates/integration_wpp.html")),
];

/// Compiled page templates.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, ApiError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

/// Result of a server-side backend fetch made on behalf of a page.
#[derive(Debug)]
pub enum Fetched<T> {
    Ready(T),
    /// The backend rejected the credential.
    SignedOut,
    /// Anything else; the page renders without this data.
    Unavailable,
}

impl<T> Fetched<T> {
    pub fn is_signed_out(&self) -> bool {
        matches!(self, Fetched::SignedOut)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Fetched::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub async fn fetch<T: DeserializeOwned>(
    backend: &BackendClient,
    endpoint: Endpoint,
    cookie: &str,
) -> Fetched<T> {
    match backend.get_json(&endpoint, Some(cookie)).await {
        Ok(value) => Fetched::Ready(value),
        Err(UpstreamError::Rejected(status)) if status == axum::http::StatusCode::UNAUTHORIZED => {
            Fetched::SignedOut
        }
        Err(err) => {
            tracing::warn!(path = %endpoint, "Page data unavailable: {}", err);
            Fetched::Unavailable
        }
    }
}

/// Page handlers check the credential themselves too, for routes the guard
/// table does not cover.
pub fn require_session(session: Option<SessionToken>) -> Result<SessionToken, Response> {
    session.ok_or_else(|| Redirect::temporary("/").into_response())
}

pub fn signed_out() -> Response {
    Redirect::temporary(LOGOUT_ROUTE).into_response()
}

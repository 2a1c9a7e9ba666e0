//! Route guard: cookie-presence redirects in front of every route.
//!
//! Rules are evaluated top to bottom and the first one that decides wins:
//!
//! 1. public auth API prefixes always pass;
//! 2. protected page prefixes without a credential go to `/`;
//! 3. the login and forgot-password pages with a credential go to the
//!    landing page;
//! 4. anything else passes.
//!
//! Only presence of a credential cookie is checked. Signature, expiry and
//! revocation are the backend's job on every API call, so a stale or forged
//! cookie still reaches protected pages here.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::auth::{cookies::RequestCookies, has_credential};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Pass regardless of credentials.
    Open,
    /// Redirect to the login page when no credential is present.
    RequireSession,
    /// Redirect to the landing page when a credential is present.
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "match", content = "path", rename_all = "snake_case")]
pub enum PathMatch {
    Prefix(&'static str),
    Exact(&'static str),
}

impl PathMatch {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Prefix(prefix) => path.starts_with(*prefix),
            PathMatch::Exact(exact) => path == *exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardRule {
    #[serde(flatten)]
    pub path: PathMatch,
    pub policy: Policy,
}

const fn rule(path: PathMatch, policy: Policy) -> GuardRule {
    GuardRule { path, policy }
}

pub const DEFAULT_RULES: &[GuardRule] = &[
    // Public auth API
    rule(PathMatch::Prefix("/api/auth/login"), Policy::Open),
    rule(PathMatch::Prefix("/api/auth/forgot-password"), Policy::Open),
    rule(PathMatch::Prefix("/api/auth/set-cookies"), Policy::Open),
    rule(PathMatch::Prefix("/api/auth/logout"), Policy::Open),
    // Protected pages
    rule(PathMatch::Prefix("/dashboard"), Policy::RequireSession),
    rule(PathMatch::Prefix("/config-user"), Policy::RequireSession),
    rule(PathMatch::Prefix("/change-password"), Policy::RequireSession),
    rule(PathMatch::Prefix("/whatsapp-instances"), Policy::RequireSession),
    rule(PathMatch::Prefix("/whatsapp-groups"), Policy::RequireSession),
    rule(PathMatch::Prefix("/integration-wpp"), Policy::RequireSession),
    // Guest pages
    rule(PathMatch::Exact("/"), Policy::GuestOnly),
    rule(PathMatch::Exact("/forgot-password"), Policy::GuestOnly),
];

pub const LOGIN_PAGE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Pass,
    RedirectToLogin,
    RedirectToLanding,
}

pub fn evaluate(rules: &[GuardRule], path: &str, has_credential: bool) -> GuardDecision {
    for rule in rules.iter().filter(|rule| rule.path.matches(path)) {
        match (rule.policy, has_credential) {
            (Policy::Open, _) => return GuardDecision::Pass,
            (Policy::RequireSession, false) => return GuardDecision::RedirectToLogin,
            (Policy::GuestOnly, true) => return GuardDecision::RedirectToLanding,
            // Satisfied; later rules may still apply
            _ => {}
        }
    }
    GuardDecision::Pass
}

pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let cookies = RequestCookies::from_headers(request.headers());

    match evaluate(DEFAULT_RULES, &path, has_credential(&cookies)) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::RedirectToLogin => {
            tracing::debug!(%path, "No credential, redirecting to login");
            Redirect::temporary(LOGIN_PAGE).into_response()
        }
        GuardDecision::RedirectToLanding => {
            tracing::debug!(%path, "Already signed in, redirecting to landing page");
            Redirect::temporary(&state.config.session.landing_page).into_response()
        }
    }
}

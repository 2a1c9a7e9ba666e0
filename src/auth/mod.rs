pub mod cookies;

use serde::Deserialize;

use crate::config::SessionConfig;
use cookies::{RequestCookies, SetCookie};

/// Cookie issued by the current backend.
pub const SESSION_COOKIE: &str = "session";
/// Short-lived token minted by the login-action flow.
pub const ID_TOKEN_COOKIE: &str = "idToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Every cookie name that has carried a credential. Logout clears all of them.
pub const AUTH_COOKIES: [&str; 3] = [SESSION_COOKIE, ID_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE];

/// Credential lookup shared by the guard and the forwarding handlers.
///
/// The backend moved from issuing `idToken` to `session`; both are accepted
/// until the old name is gone from every browser. `session` wins when both
/// are present. Empty values count as absent. The value is never validated
/// here, the backend re-checks it on every call.
pub fn session_token(cookies: &RequestCookies) -> Option<&str> {
    [SESSION_COOKIE, ID_TOKEN_COOKIE]
        .into_iter()
        .filter_map(|name| cookies.get(name))
        .find(|value| !value.is_empty())
}

pub fn has_credential(cookies: &RequestCookies) -> bool {
    session_token(cookies).is_some()
}

/// Tokens returned by a successful backend login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTokens {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl LoginTokens {
    /// Both tokens, if the backend sent both non-empty.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.id_token.as_deref(), self.refresh_token.as_deref()) {
            (Some(id), Some(refresh)) if !id.is_empty() && !refresh.is_empty() => Some((id, refresh)),
            _ => None,
        }
    }
}

/// Re-wrap backend tokens as browser cookies.
pub fn login_cookies(id_token: &str, refresh_token: &str, session: &SessionConfig) -> [SetCookie; 2] {
    [
        SetCookie::session(ID_TOKEN_COOKIE, id_token, session.id_token_max_age_secs, session.secure_cookies),
        SetCookie::session(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            session.refresh_token_max_age_secs,
            session.secure_cookies,
        ),
    ]
}

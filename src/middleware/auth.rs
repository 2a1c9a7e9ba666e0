use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{cookies::RequestCookies, session_token, SESSION_COOKIE};
use crate::error::ApiError;

/// Session credential taken from the request cookies.
///
/// Use it as an extractor on routes that need a session; a request without
/// one is answered 401 before the handler runs, so the backend is never
/// contacted. `Option<SessionToken>` makes the credential optional.
#[derive(Clone, Debug)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the outbound `Cookie` header.
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies = RequestCookies::from_headers(&parts.headers);
        match session_token(&cookies) {
            Some(token) => Ok(SessionToken::new(token)),
            None => {
                tracing::debug!(path = %parts.uri.path(), "No session cookie found");
                Err(ApiError::unauthorized("Unauthorized"))
            }
        }
    }
}

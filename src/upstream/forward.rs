//! The fetch-wrap-relay pattern behind every resource route.
//!
//! A route describes its upstream call once:
//!
//! ```ignore
//! Forward::delete(Endpoint::path("/api/user-numbers").push(&id))
//!     .fallback("Error deleting number")
//!     .on_success(OnSuccess::Message("Number deleted successfully"))
//!     .send(&state.backend, Some(&session))
//!     .await
//! ```
//!
//! and gets the shared error policy: rejected calls keep the backend status
//! with the best message found in the body, transport and decode failures
//! become a generic 500.

use axum::http::{Method, StatusCode};
use serde_json::Value;

use super::{BackendClient, Endpoint, UpstreamReply};
use crate::error::ApiError;
use crate::middleware::auth::SessionToken;
use crate::middleware::response::JsonReply;

/// What the browser gets when the backend call succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnSuccess {
    /// Backend status and body.
    Relay,
    /// Backend body under a fixed status.
    Status(StatusCode),
    /// `200 {"message": ...}`; the backend body is not read.
    Message(&'static str),
}

#[derive(Debug, Clone)]
pub struct Forward {
    method: Method,
    endpoint: Endpoint,
    body: Option<Value>,
    fallback: &'static str,
    on_success: OnSuccess,
}

impl Forward {
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            body: None,
            fallback: "Internal Server Error",
            on_success: OnSuccess::Status(StatusCode::OK),
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: Endpoint) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// JSON body forwarded as-is.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Message used when a rejected call carries no usable error text.
    pub fn fallback(mut self, message: &'static str) -> Self {
        self.fallback = message;
        self
    }

    pub fn on_success(mut self, policy: OnSuccess) -> Self {
        self.on_success = policy;
        self
    }

    /// One call, no retry. The credential is re-synthesized as
    /// `Cookie: session=<value>` whichever cookie name it arrived under.
    pub async fn send(self, backend: &BackendClient, session: Option<&SessionToken>) -> Result<JsonReply, ApiError> {
        let cookie = session.map(SessionToken::cookie_header);
        let reply = backend
            .send(self.method.clone(), &self.endpoint, cookie.as_deref(), self.body.as_ref())
            .await?;
        self.relay(reply)
    }

    pub fn relay(&self, reply: UpstreamReply) -> Result<JsonReply, ApiError> {
        if !reply.is_success() {
            let message = reply.error_message(self.fallback);
            tracing::warn!(
                method = %self.method,
                path = %self.endpoint,
                status = reply.status.as_u16(),
                %message,
                "Backend rejected request"
            );
            return Err(ApiError::upstream(reply.status, message));
        }

        match self.on_success {
            OnSuccess::Message(message) => Ok(JsonReply::message(StatusCode::OK, message)),
            OnSuccess::Relay => Ok(JsonReply::with_status(reply.json()?, reply.status)),
            OnSuccess::Status(status) => Ok(JsonReply::with_status(reply.json()?, status)),
        }
    }
}

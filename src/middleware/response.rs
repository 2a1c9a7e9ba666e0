use axum::{
    http::{header::IntoHeaderName, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::auth::cookies::{clear_auth_cookies, SetCookie};

/// JSON body with an explicit status plus extra headers, mostly `Set-Cookie`.
///
/// Relayed backend bodies go out untouched; this type never wraps them in
/// an envelope.
#[derive(Debug)]
pub struct JsonReply {
    pub status: StatusCode,
    pub body: Value,
    pub headers: HeaderMap,
}

impl JsonReply {
    pub fn with_status(body: Value, status: StatusCode) -> Self {
        Self {
            status,
            body,
            headers: HeaderMap::new(),
        }
    }

    /// 200 OK
    pub fn ok(body: Value) -> Self {
        Self::with_status(body, StatusCode::OK)
    }

    /// `{"message": ...}` with the given status
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::with_status(json!({ "message": message }), status)
    }

    pub fn append_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn set_cookie(mut self, cookie: &SetCookie) -> Self {
        cookie.append_to(&mut self.headers);
        self
    }

    pub fn clear_auth_cookies(mut self) -> Self {
        clear_auth_cookies(&mut self.headers);
        self
    }
}

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        response.headers_mut().extend(self.headers);
        response
    }
}

//! Cookie header parsing and `Set-Cookie` construction.

use axum::http::{header, HeaderMap, HeaderValue};

use super::AUTH_COOKIES;

/// Cookies sent by the browser, in header order.
#[derive(Debug, Clone, Default)]
pub struct RequestCookies {
    pairs: Vec<(String, String)>,
}

impl RequestCookies {
    /// Collect every `name=value` pair across all `Cookie` headers.
    /// Malformed fragments are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let pairs = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|fragment| {
                let (name, value) = fragment.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let value = value.trim().trim_matches('"');
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Self { pairs }
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Re-serialize as a single `Cookie` header value.
    pub fn to_header_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A cookie this service sets on the browser.
#[derive(Debug, Clone)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: &'static str,
    pub path: &'static str,
}

impl SetCookie {
    /// HTTP-only, site-wide, lax cookie living `max_age` seconds.
    pub fn session(name: impl Into<String>, value: impl Into<String>, max_age: i64, secure: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age,
            http_only: true,
            secure,
            same_site: "Lax",
            path: "/",
        }
    }

    /// Deletion marker for `name`: empty value, already expired.
    pub fn expired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            max_age: 0,
            http_only: false,
            secure: false,
            same_site: "Lax",
            path: "/",
        }
    }

    pub fn header_string(&self) -> String {
        let mut out = format!("{}={}; Path={}; Max-Age={}", self.name, self.value, self.path, self.max_age);
        if self.max_age == 0 {
            out.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        if self.secure {
            out.push_str("; Secure");
        }
        out.push_str("; SameSite=");
        out.push_str(self.same_site);
        out
    }

    /// Append as a `Set-Cookie` header. Values that cannot be encoded as a
    /// header (control characters from a misbehaving backend) are dropped.
    pub fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.header_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(_) => tracing::warn!(cookie = %self.name, "Dropping cookie with invalid characters"),
        }
    }
}

/// Expire every cookie that has ever carried a credential.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for name in AUTH_COOKIES {
        SetCookie::expired(name).append_to(headers);
    }
}

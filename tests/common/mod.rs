#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use reqwest::redirect::Policy;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use whatsapp_bff::{app, config::AppConfig, state::AppState};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    /// Path as received, still percent-encoded.
    pub path: String,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    set_cookies: Vec<String>,
}

#[derive(Clone, Default)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<HashMap<(Method, String), Canned>>>,
}

/// Stand-in for the dashboard backend: canned answers per method and path,
/// every request recorded. Unknown routes answer 404 `{"message":"Not mocked"}`.
pub struct MockBackend {
    pub url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let state = MockState::default();
        let router = Router::new().fallback(record).with_state(state.clone());
        let addr = spawn(router).await?;
        Ok(Self {
            url: format!("http://{addr}"),
            state,
        })
    }

    /// JSON answer for `method path`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.on_raw(method, path, status, &body.to_string());
    }

    /// Raw (possibly non-JSON) answer.
    pub fn on_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, body, &[]);
    }

    /// JSON answer carrying `Set-Cookie` headers.
    pub fn on_with_cookies(&self, method: Method, path: &str, status: u16, body: Value, cookies: &[&str]) {
        self.insert(method, path, status, &body.to_string(), cookies);
    }

    fn insert(&self, method: Method, path: &str, status: u16, body: &str, cookies: &[&str]) {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            set_cookies: cookies.iter().map(|c| c.to_string()).collect(),
        };
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), canned);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|call| call.path == path).collect()
    }

    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one backend call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let path = uri.path().to_string();

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        cookie: header_str(header::COOKIE),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).ok(),
    });

    let canned = state.responses.lock().unwrap().get(&(method, path)).cloned();
    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, r#"{"message":"Not mocked"}"#).into_response();
    };

    let mut response = (canned.status, canned.body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for cookie in canned.set_cookies {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    }
    response
}

async fn spawn(router: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await.context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// The BFF served on an ephemeral port, talking to its own mock backend.
pub struct TestServer {
    pub base_url: String,
    pub backend: MockBackend,
    client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<reqwest::Response> {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, body: Value) -> Result<reqwest::Response> {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    pub async fn post_raw(&self, path: &str, cookie: Option<&str>, body: &str) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .post(self.url(path))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> Result<reqwest::Response> {
        let mut request = self.client.delete(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }
}

impl TestServer {
    /// Request written straight to the socket, so the path reaches the
    /// router exactly as given. Returns the status code and the body.
    pub async fn raw(&self, method: &str, path: &str, cookie: &str) -> Result<(u16, String)> {
        let authority = self.base_url.trim_start_matches("http://");
        let mut stream = TcpStream::connect(authority).await?;
        let request = format!(
            "{method} {path} HTTP/1.1\r\nHost: {authority}\r\nCookie: {cookie}\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).await?;

        let mut response = String::new();
        stream.read_to_string(&mut response).await?;
        let status = response
            .split_whitespace()
            .nth(1)
            .context("empty response")?
            .parse()?;
        let body = response.split_once("\r\n\r\n").map(|(_, b)| b.to_string()).unwrap_or_default();
        Ok((status, body))
    }
}

pub async fn start_server() -> Result<TestServer> {
    let backend = MockBackend::start().await?;
    let api_url = backend.url.clone();
    start_server_with(backend, &api_url).await
}

/// BFF pointed at a backend URL where nothing listens.
pub async fn start_server_without_backend() -> Result<TestServer> {
    let backend = MockBackend::start().await?;
    let dead = unreachable_url().await?;
    start_server_with(backend, &dead).await
}

async fn start_server_with(backend: MockBackend, api_url: &str) -> Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await.context("failed to bind BFF listener")?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let config = AppConfig::development()
        .with_backend_url(api_url)
        .with_base_url(base_url.clone());
    let router = app(AppState::new(config)?);
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    // Redirects and cookies are asserted on, so the client follows neither
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

    Ok(TestServer {
        base_url,
        backend,
        client,
    })
}

async fn unreachable_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// True when every credential cookie is expired on the response.
pub fn clears_auth_cookies(response: &reqwest::Response) -> bool {
    let cookies = set_cookies(response);
    ["session", "idToken", "refreshToken"]
        .iter()
        .all(|name| cookies.iter().any(|c| c.starts_with(&format!("{name}=;")) && c.contains("Max-Age=0")))
}

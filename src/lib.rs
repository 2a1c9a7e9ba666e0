pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod state;
pub mod types;
pub mod upstream;

use std::any::Any;

use anyhow::Context;
use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Full router: pages, public and protected API, behind the route guard.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Server-rendered pages
        .merge(page_routes())
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API (session cookie forwarded)
        .merge(auth_routes())
        .merge(config_user_routes())
        .merge(number_routes())
        .merge(whatsapp_routes())
        // Global middleware
        .layer(from_fn_with_state(state.clone(), middleware::route_guard))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    tracing::info!(
        environment = ?config.environment,
        backend = %config.backend.api_url,
        "Starting WhatsApp dashboard BFF"
    );
    if config.is_production() && !config.session.secure_cookies {
        tracing::warn!("BFF_SECURE_COOKIES is off in production; credential cookies will travel over plain HTTP");
    }

    let state = AppState::new(config)?;
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn page_routes() -> Router<AppState> {
    use pages::{account, config_user, dashboard, whatsapp};

    Router::new()
        .route("/", get(account::login))
        .route("/forgot-password", get(account::forgot_password))
        .route("/change-password", get(account::change_password))
        .route("/config-user", get(config_user::page))
        .route("/dashboard", get(dashboard::page))
        .route("/whatsapp-instances", get(whatsapp::instances))
        .route("/whatsapp-groups", get(whatsapp::groups))
        .route("/integration-wpp", get(whatsapp::numbers))
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/login-action", post(auth::login_action))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/logoff", post(auth::logoff))
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::protected::auth;

    Router::new()
        .route("/api/auth/change-password", post(auth::change_password))
        .route("/api/auth/session", get(auth::session_get))
}

fn config_user_routes() -> Router<AppState> {
    use handlers::protected::config_user;

    Router::new().route("/api/config-user", get(config_user::get).post(config_user::post))
}

fn number_routes() -> Router<AppState> {
    use axum::routing::delete;
    use handlers::protected::numbers;

    Router::new()
        .route("/api/user-numbers", get(numbers::get).post(numbers::post))
        .route("/api/user-numbers/:id", delete(numbers::delete))
}

fn whatsapp_routes() -> Router<AppState> {
    use axum::routing::{delete, post};
    use handlers::protected::whatsapp;

    Router::new()
        .route("/api/whatsapp/instances", get(whatsapp::instances_list))
        .route("/api/whatsapp/instances/:instance_name", delete(whatsapp::instance_delete))
        .route("/api/whatsapp/create", post(whatsapp::instance_create))
        .route("/api/whatsapp/:instance_id/connect", get(whatsapp::instance_connect))
        .route("/api/whatsapp/:instance_id/status", get(whatsapp::instance_status))
        .route("/api/whatsapp/:instance_id/groups", get(whatsapp::instance_groups))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal_server_error("Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::new(AppConfig::development()).unwrap())
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn guard_redirects_before_handlers_run() {
        let response = test_app().oneshot(get("/dashboard", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = test_app().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn login_page_renders_for_guests() {
        let response = test_app().oneshot(get("/", Some("theme=dark"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[test]
    fn panics_become_json_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

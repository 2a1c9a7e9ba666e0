// handlers/public/auth/login.rs - POST /api/auth/login and /api/auth/login-action

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method},
    Json,
};
use serde_json::json;

use crate::auth::{login_cookies, LoginTokens};
use crate::error::{ApiError, ApiResult};
use crate::middleware::JsonReply;
use crate::state::AppState;
use crate::types::LoginRequest;
use crate::upstream::Endpoint;

use super::BACKEND_LOGIN;

/**
 * POST /api/auth/login - Authenticate against the backend
 *
 * The body goes to the backend untouched. Its status and JSON body come back
 * to the browser as-is, together with every `Set-Cookie` header it sent.
 *
 * When a successful body carries `idToken` and `refreshToken`, both are also
 * minted as HttpOnly cookies so the browser holds a credential the guard
 * recognises.
 */
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(request) = payload?;
    let credentials = serde_json::to_value(&request)?;

    let reply = state
        .backend
        .send(Method::POST, &Endpoint::path(BACKEND_LOGIN), None, Some(&credentials))
        .await?;
    let body = match reply.json() {
        Ok(body) => body,
        Err(_) if !reply.is_success() => {
            return Err(ApiError::upstream(reply.status, "Internal Server Error"));
        }
        Err(err) => return Err(err.into()),
    };
    let mut out = JsonReply::with_status(body, reply.status);

    for cookie in reply.set_cookies() {
        out = out.append_header(header::SET_COOKIE, cookie.clone());
    }

    if reply.is_success() {
        if let Ok(tokens) = reply.parse::<LoginTokens>() {
            if let Some((id_token, refresh_token)) = tokens.pair() {
                for cookie in login_cookies(id_token, refresh_token, &state.config.session) {
                    out = out.set_cookie(&cookie);
                }
            }
        }
        tracing::info!("Login succeeded");
    } else {
        tracing::info!(status = reply.status.as_u16(), "Login rejected by backend");
    }

    Ok(out)
}

/**
 * POST /api/auth/login-action - Form-style login
 *
 * Requires both `email` and `password`. Asks the backend for tokens
 * (`returnSecureToken: true`) and answers `{"status": "success"}` with the
 * `idToken` / `refreshToken` cookies set. A successful backend answer without
 * both tokens is treated as a failed login.
 */
pub async fn login_action(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(request) = payload?;
    let (email, password) = request
        .credentials()
        .ok_or_else(|| ApiError::bad_request("Missing email or password"))?;

    let body = json!({
        "email": email,
        "password": password,
        "returnSecureToken": true,
    });
    let reply = state
        .backend
        .send(Method::POST, &Endpoint::path(BACKEND_LOGIN), None, Some(&body))
        .await?;

    if !reply.is_success() {
        let message = reply.error_message("Login failed");
        tracing::info!(status = reply.status.as_u16(), %message, "Login rejected by backend");
        return Err(ApiError::upstream(reply.status, message));
    }

    let tokens: LoginTokens = reply.parse()?;
    let Some((id_token, refresh_token)) = tokens.pair() else {
        tracing::warn!("Backend accepted login but returned no tokens");
        return Err(ApiError::unauthorized("Login failed, no tokens received"));
    };

    let mut out = JsonReply::ok(json!({ "status": "success" }));
    for cookie in login_cookies(id_token, refresh_token, &state.config.session) {
        out = out.set_cookie(&cookie);
    }
    Ok(out)
}

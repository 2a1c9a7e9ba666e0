// handlers/public/auth/logout.rs - GET /api/auth/logout and POST /api/auth/logoff
//
// Both always clear `session`, `idToken` and `refreshToken`, whatever the
// backend says.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::cookies::clear_auth_cookies;
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::upstream::Endpoint;

/// GET /api/auth/logout - Clear credentials and send the browser to the login page
pub async fn logout(State(state): State<AppState>) -> Response {
    let target = format!("{}/", state.config.server.base_url);
    let mut response = Redirect::temporary(&target).into_response();
    clear_auth_cookies(response.headers_mut());
    response
}

/**
 * POST /api/auth/logoff - End the backend session
 *
 * Always answers 200:
 * - no credential: `No active session`, backend not contacted;
 * - backend accepted: `Logout successful`;
 * - backend rejected or unreachable: `Logout completed with errors`.
 */
pub async fn logoff(State(state): State<AppState>, session: Option<SessionToken>) -> JsonReply {
    let Some(session) = session else {
        return JsonReply::message(StatusCode::OK, "No active session").clear_auth_cookies();
    };

    let cookie = session.cookie_header();
    let outcome = state
        .backend
        .send(Method::POST, &Endpoint::path("/api/auth/logoff"), Some(&cookie), None)
        .await;

    let message = match outcome {
        Ok(reply) if reply.is_success() => "Logout successful",
        Ok(reply) => {
            tracing::warn!(status = reply.status.as_u16(), "Backend rejected logoff");
            "Logout completed with errors"
        }
        Err(err) => {
            tracing::error!("Backend logoff failed: {}", err);
            "Logout completed with errors"
        }
    };

    JsonReply::message(StatusCode::OK, message).clear_auth_cookies()
}

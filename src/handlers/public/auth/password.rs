// handlers/public/auth/password.rs - POST /api/auth/forgot-password

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::JsonReply;
use crate::state::AppState;
use crate::types::ForgotPasswordRequest;
use crate::upstream::{Endpoint, Forward, OnSuccess};

/// POST /api/auth/forgot-password - Ask the backend to send a recovery email
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(request) = payload?;
    let email = request
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    Forward::post(Endpoint::path("/api/auth/forgot-password"))
        .json(json!({ "email": email }))
        .fallback("Error requesting password recovery")
        .on_success(OnSuccess::Relay)
        .send(&state.backend, None)
        .await
}

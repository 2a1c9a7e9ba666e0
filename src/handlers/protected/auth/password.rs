use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::handlers::protected::utils::{fields_of, present};
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::types::ChangePasswordRequest;
use crate::upstream::{Endpoint, Forward};

/// POST /api/auth/change-password - Change the signed-in user's password
///
/// `newPassword` is required; the body is forwarded unchanged.
pub async fn change(
    State(state): State<AppState>,
    session: SessionToken,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(body) = payload?;
    let request: ChangePasswordRequest = fields_of(&body);
    if !present(request.new_password.as_deref()) {
        return Err(ApiError::bad_request("New password is required"));
    }

    Forward::post(Endpoint::path("/api/auth/change-password"))
        .json(body)
        .fallback("Error changing password")
        .send(&state.backend, Some(&session))
        .await
}

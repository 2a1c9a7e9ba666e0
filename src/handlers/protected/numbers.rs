use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::ApiResult;
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::upstream::{Endpoint, Forward, OnSuccess};

const USER_NUMBERS: &str = "/api/user-numbers";

/// GET /api/user-numbers - List the user's registered numbers
pub async fn get(State(state): State<AppState>, session: SessionToken) -> ApiResult<JsonReply> {
    Forward::get(Endpoint::path(USER_NUMBERS))
        .fallback("Error fetching numbers")
        .send(&state.backend, Some(&session))
        .await
}

/// POST /api/user-numbers - Register a number (the backend enforces the limit)
pub async fn post(
    State(state): State<AppState>,
    session: SessionToken,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(body) = payload?;
    Forward::post(Endpoint::path(USER_NUMBERS))
        .json(body)
        .fallback("Error creating number")
        .on_success(OnSuccess::Status(StatusCode::CREATED))
        .send(&state.backend, Some(&session))
        .await
}

/// DELETE /api/user-numbers/:id - Remove a registered number
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: SessionToken,
) -> ApiResult<JsonReply> {
    Forward::delete(Endpoint::path(USER_NUMBERS).push(&id))
        .fallback("Error deleting number")
        .on_success(OnSuccess::Message("Number deleted successfully"))
        .send(&state.backend, Some(&session))
        .await
}

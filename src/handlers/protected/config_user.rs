use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiResult;
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::upstream::{Endpoint, Forward};

const CONFIG_USER: &str = "/api/config-user";

/// GET /api/config-user - Fetch the user's configuration record(s)
pub async fn get(State(state): State<AppState>, session: SessionToken) -> ApiResult<JsonReply> {
    Forward::get(Endpoint::path(CONFIG_USER))
        .fallback("Error fetching user config")
        .send(&state.backend, Some(&session))
        .await
}

/// POST /api/config-user - Create or replace the user's configuration
pub async fn post(
    State(state): State<AppState>,
    session: SessionToken,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(body) = payload?;
    Forward::post(Endpoint::path(CONFIG_USER))
        .json(body)
        .fallback("Error updating user config")
        .send(&state.backend, Some(&session))
        .await
}

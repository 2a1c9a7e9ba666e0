use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::handlers::protected::utils::{fields_of, present};
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::types::CreateInstanceRequest;
use crate::upstream::{Endpoint, Forward, OnSuccess};

const INSTANCES: &str = "/api/whatsapp/instances";

/// GET /api/whatsapp/instances - `{instances, count, limit}` for the user
pub async fn list(State(state): State<AppState>, session: SessionToken) -> ApiResult<JsonReply> {
    Forward::get(Endpoint::path(INSTANCES))
        .fallback("Error fetching instances")
        .send(&state.backend, Some(&session))
        .await
}

/// POST /api/whatsapp/create - Create an instance
///
/// `instanceName` is required; `token` is optional. The backend's status and
/// body (usually the pairing QR) are relayed as-is.
pub async fn create(
    State(state): State<AppState>,
    session: SessionToken,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<JsonReply> {
    let Json(body) = payload?;
    let request: CreateInstanceRequest = fields_of(&body);
    if !present(request.instance_name.as_deref()) {
        return Err(ApiError::bad_request("Instance name is required"));
    }

    Forward::post(Endpoint::path("/api/whatsapp/create"))
        .json(body)
        .fallback("Error creating WhatsApp instance")
        .on_success(OnSuccess::Relay)
        .send(&state.backend, Some(&session))
        .await
}

/// DELETE /api/whatsapp/instances/:instanceName - Remove an instance
pub async fn delete(
    State(state): State<AppState>,
    Path(instance_name): Path<String>,
    session: SessionToken,
) -> ApiResult<JsonReply> {
    Forward::delete(Endpoint::path(INSTANCES).push(&instance_name))
        .fallback("Error deleting instance")
        .on_success(OnSuccess::Message("Instance deleted successfully"))
        .send(&state.backend, Some(&session))
        .await
}

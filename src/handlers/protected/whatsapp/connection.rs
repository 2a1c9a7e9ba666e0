use axum::extract::{Path, State};

use crate::error::ApiResult;
use crate::middleware::{JsonReply, SessionToken};
use crate::state::AppState;
use crate::upstream::{Endpoint, Forward};

fn instance_endpoint(instance_id: &str, action: &str) -> Endpoint {
    Endpoint::path("/api/whatsapp").push(instance_id).push(action)
}

/// GET /api/whatsapp/:instanceId/connect - Pairing QR, fetched from `/qr`
pub async fn connect(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    session: SessionToken,
) -> ApiResult<JsonReply> {
    Forward::get(instance_endpoint(&instance_id, "qr"))
        .fallback("Error fetching QR code")
        .send(&state.backend, Some(&session))
        .await
}

/// GET /api/whatsapp/:instanceId/status - `connecting`, `connected` or `disconnected`
pub async fn status(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    session: SessionToken,
) -> ApiResult<JsonReply> {
    Forward::get(instance_endpoint(&instance_id, "status"))
        .fallback("Error fetching status")
        .send(&state.backend, Some(&session))
        .await
}

/// GET /api/whatsapp/:instanceId/groups - Groups visible to the instance
pub async fn groups(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    session: SessionToken,
) -> ApiResult<JsonReply> {
    Forward::get(instance_endpoint(&instance_id, "groups"))
        .fallback("Error fetching groups")
        .send(&state.backend, Some(&session))
        .await
}

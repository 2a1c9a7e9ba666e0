use serde_json::json;

use crate::middleware::{JsonReply, SessionToken};

/// GET /api/auth/session - Whether the browser holds a credential
///
/// Presence only, like the route guard; the backend is not asked. Without a
/// credential the extractor answers 401.
pub async fn get(_session: SessionToken) -> JsonReply {
    JsonReply::ok(json!({ "isAuthenticated": true }))
}

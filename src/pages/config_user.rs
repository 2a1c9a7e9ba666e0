use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::auth::{cookies::RequestCookies, has_credential};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::UserConfigEnvelope;
use crate::upstream::Endpoint;

use super::signed_out;

/**
 * GET /config-user - Configuration form
 *
 * Loads the current record through this service's own `/api/config-user`
 * (at the configured base URL) with every incoming cookie attached:
 * - 401 from that call: go through logout;
 * - `{success: true, data: [cfg, ...]}`: the first record pre-fills the form;
 * - anything else, including a failed call: empty form.
 */
pub async fn page(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let cookies = RequestCookies::from_headers(&headers);
    if !has_credential(&cookies) {
        return Ok(Redirect::temporary("/").into_response());
    }

    let reply = state
        .internal
        .send(
            Method::GET,
            &Endpoint::path("/api/config-user"),
            Some(&cookies.to_header_string()),
            None,
        )
        .await;

    let config = match reply {
        Ok(reply) if reply.status == StatusCode::UNAUTHORIZED => return Ok(signed_out()),
        Ok(reply) if reply.is_success() => reply
            .parse::<UserConfigEnvelope>()
            .ok()
            .and_then(UserConfigEnvelope::into_first),
        Ok(reply) => {
            tracing::warn!(status = reply.status.as_u16(), "Config fetch rejected, rendering empty form");
            None
        }
        Err(err) => {
            tracing::warn!("Config fetch failed, rendering empty form: {}", err);
            None
        }
    };

    let html = state.pages.render(
        "config_user.html",
        context! {
            title => "Configuration",
            config => config.unwrap_or_default(),
        },
    )?;
    Ok(html.into_response())
}

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use minijinja::context;

use crate::error::ApiResult;
use crate::middleware::SessionToken;
use crate::state::AppState;
use crate::types::{ListInstancesResponse, NumberList, UserConfigEnvelope, NUMBER_LIMIT};
use crate::upstream::Endpoint;

use super::{fetch, require_session, signed_out, Fetched};

/// GET /dashboard - Summary tiles
///
/// Instances, numbers and configuration are fetched concurrently; a tile
/// whose fetch fails renders as unavailable.
pub async fn page(State(state): State<AppState>, session: Option<SessionToken>) -> ApiResult<Response> {
    let session = match require_session(session) {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let cookie = session.cookie_header();

    let (instances, numbers, config) = futures::join!(
        fetch::<ListInstancesResponse>(&state.backend, Endpoint::path("/api/whatsapp/instances"), &cookie),
        fetch::<NumberList>(&state.backend, Endpoint::path("/api/user-numbers"), &cookie),
        fetch::<UserConfigEnvelope>(&state.backend, Endpoint::path("/api/config-user"), &cookie),
    );

    if instances.is_signed_out() || numbers.is_signed_out() || config.is_signed_out() {
        return Ok(signed_out());
    }

    let numbers = numbers.ready().map(NumberList::into_vec);
    let config = match config {
        Fetched::Ready(envelope) => Some(envelope.into_first().is_some()),
        _ => None,
    };

    let html = state.pages.render(
        "dashboard.html",
        context! {
            title => "Dashboard",
            instances => instances.ready(),
            numbers => numbers,
            number_limit => NUMBER_LIMIT,
            configured => config,
        },
    )?;
    Ok(html.into_response())
}

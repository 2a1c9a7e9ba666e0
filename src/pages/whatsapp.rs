// WhatsApp pages: instances, groups and registered numbers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use minijinja::context;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::middleware::SessionToken;
use crate::state::AppState;
use crate::types::{ListGroupsResponse, ListInstancesResponse, NumberList, QrCode, NUMBER_LIMIT};
use crate::upstream::Endpoint;

use super::{fetch, require_session, signed_out, Fetched};

#[derive(Debug, Default, Deserialize)]
pub struct InstancesQuery {
    /// Instance whose pairing QR should be shown.
    pub connect: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupsQuery {
    /// Instance whose groups should be listed.
    pub instance: Option<String>,
}

/// GET /whatsapp-instances[?connect=<name>] - Instance list, create form, pairing QR
pub async fn instances(
    State(state): State<AppState>,
    Query(query): Query<InstancesQuery>,
    session: Option<SessionToken>,
) -> ApiResult<Response> {
    let session = match require_session(session) {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let cookie = session.cookie_header();

    let list = fetch::<ListInstancesResponse>(&state.backend, Endpoint::path("/api/whatsapp/instances"), &cookie).await;
    if list.is_signed_out() {
        return Ok(signed_out());
    }

    let qr = match query.connect.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => {
            let endpoint = Endpoint::path("/api/whatsapp").push(name).push("qr");
            match fetch::<QrCode>(&state.backend, endpoint, &cookie).await {
                Fetched::SignedOut => return Ok(signed_out()),
                fetched => fetched.ready(),
            }
        }
        None => None,
    };

    let list = list.ready();
    let limit_reached = list.as_ref().is_some_and(ListInstancesResponse::is_limit_reached);
    let html = state.pages.render(
        "whatsapp_instances.html",
        context! {
            title => "WhatsApp instances",
            list => list,
            limit_reached => limit_reached,
            connect => query.connect,
            qr => qr,
        },
    )?;
    Ok(html.into_response())
}

/// GET /whatsapp-groups[?instance=<name>] - Pick an instance, list its groups
pub async fn groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
    session: Option<SessionToken>,
) -> ApiResult<Response> {
    let session = match require_session(session) {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let cookie = session.cookie_header();

    let list = fetch::<ListInstancesResponse>(&state.backend, Endpoint::path("/api/whatsapp/instances"), &cookie).await;
    if list.is_signed_out() {
        return Ok(signed_out());
    }

    let selected = query.instance.filter(|name| !name.is_empty());
    let groups = match selected.as_deref() {
        Some(name) => {
            let endpoint = Endpoint::path("/api/whatsapp").push(name).push("groups");
            match fetch::<ListGroupsResponse>(&state.backend, endpoint, &cookie).await {
                Fetched::SignedOut => return Ok(signed_out()),
                fetched => fetched.ready().map(|response| response.groups),
            }
        }
        None => None,
    };

    let html = state.pages.render(
        "whatsapp_groups.html",
        context! {
            title => "WhatsApp groups",
            instances => list.ready().map(|list| list.instances),
            selected => selected,
            groups => groups,
        },
    )?;
    Ok(html.into_response())
}

/// GET /integration-wpp - Registered numbers with add and delete
pub async fn numbers(State(state): State<AppState>, session: Option<SessionToken>) -> ApiResult<Response> {
    let session = match require_session(session) {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let cookie = session.cookie_header();

    let numbers = match fetch::<NumberList>(&state.backend, Endpoint::path("/api/user-numbers"), &cookie).await {
        Fetched::SignedOut => return Ok(signed_out()),
        fetched => fetched.ready().map(NumberList::into_vec),
    };

    let count = numbers.as_ref().map_or(0, Vec::len);
    let html = state.pages.render(
        "integration_wpp.html",
        context! {
            title => "Registered numbers",
            available => numbers.is_some(),
            numbers => numbers.unwrap_or_default(),
            count => count,
            limit => NUMBER_LIMIT,
        },
    )?;
    Ok(html.into_response())
}

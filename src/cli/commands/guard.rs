use serde_json::json;

use crate::auth::{cookies::RequestCookies, has_credential};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::SessionConfig;
use crate::middleware::guard::{evaluate, GuardDecision, DEFAULT_RULES, LOGIN_PAGE};

/// `name=value` as given to `--cookie`.
pub fn parse_cookie(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

pub fn handle(
    path: &str,
    cookies: Vec<(String, String)>,
    session: &SessionConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let cookies = RequestCookies::from_pairs(cookies);
    let credential = has_credential(&cookies);
    let decision = evaluate(DEFAULT_RULES, path, credential);

    let location = match decision {
        GuardDecision::Pass => None,
        GuardDecision::RedirectToLogin => Some(LOGIN_PAGE),
        GuardDecision::RedirectToLanding => Some(session.landing_page.as_str()),
    };
    let message = match location {
        Some(location) => format!("{path} -> redirect to {location}"),
        None => format!("{path} -> pass"),
    };

    output_success(
        &output_format,
        &message,
        Some(json!({
            "path": path,
            "credential": credential,
            "decision": decision,
            "location": location,
        })),
    )
}

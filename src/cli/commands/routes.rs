use serde_json::json;

use crate::cli::OutputFormat;
use crate::middleware::guard::{PathMatch, Policy, DEFAULT_RULES};

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "rules": DEFAULT_RULES }))?);
        }
        OutputFormat::Text => {
            for (position, rule) in DEFAULT_RULES.iter().enumerate() {
                let (kind, path) = match rule.path {
                    PathMatch::Prefix(path) => ("prefix", path),
                    PathMatch::Exact(path) => ("exact", path),
                };
                let policy = match rule.policy {
                    Policy::Open => "open",
                    Policy::RequireSession => "require session",
                    Policy::GuestOnly => "guests only",
                };
                println!("{:>2}. {:<6} {:<28} {}", position + 1, kind, path, policy);
            }
        }
    }
    Ok(())
}

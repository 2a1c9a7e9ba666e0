pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Parser)]
#[command(name = "whatsapp-bff")]
#[command(about = "Backend-for-frontend for the WhatsApp integration dashboard")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, short, help = "Listen port (overrides PORT / BFF_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Show what the route guard decides for a path")]
    Guard {
        #[arg(help = "Request path, e.g. /dashboard")]
        path: String,
        #[arg(
            long = "cookie",
            value_name = "NAME=VALUE",
            value_parser = commands::guard::parse_cookie,
            help = "Cookie sent with the request (repeatable)"
        )]
        cookies: Vec<(String, String)>,
    },

    #[command(about = "List the route guard rules in evaluation order")]
    Routes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config::config().clone(), port).await,
        Commands::Guard { path, cookies } => {
            commands::guard::handle(&path, cookies, &config::config().session, output_format)
        }
        Commands::Routes => commands::routes::handle(output_format),
    }
}

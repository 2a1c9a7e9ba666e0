use clap::Parser;
use tracing_subscriber::EnvFilter;

use whatsapp_bff::cli::{self, utils::output_error, Cli, OutputFormat};

const DEFAULT_LOG_FILTER: &str = "whatsapp_bff=debug,tower_http=info";

#[tokio::main]
async fn main() {
    // Load .env if present so NEXT_PUBLIC_API_URL and friends apply to cargo run
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = cli::run(cli).await {
        let _ = output_error(&output_format, &format!("{e:#}"), None);
        std::process::exit(1);
    }
}

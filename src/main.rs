use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use filing_lens::api::HttpFilingApi;
use filing_lens::cli::{self, Cli, Commands};
use filing_lens::config::{self, FilingLensConfig};
use filing_lens::errors::FilingLensError;
use filing_lens::repl::ReplSession;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps stdout free for reports
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), FilingLensError> {
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let config = config::load_config(config_path.as_deref(), cli.api_url.as_deref()).await?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => handle_repl(config).await,
        Commands::Report(args) => cli::report::handle_report(args, &config).await,
        Commands::Ask(args) => cli::ask::handle_ask(args, &config).await,
        Commands::Health => cli::health::handle_health(&config).await,
    }
}

async fn handle_repl(config: FilingLensConfig) -> Result<(), FilingLensError> {
    let api = Arc::new(HttpFilingApi::new(config.base_url()));
    ReplSession::new(api, config).run().await
}

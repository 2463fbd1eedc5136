use clap::{Args, Parser, Subcommand};

use crate::models::FilingType;

#[derive(Parser)]
#[command(name = "filing-lens", version, about = "AI-powered SEC filing analysis from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file (default: ./filing-lens.yaml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Backend base URL, overrides config and FILING_LENS_API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session (default)
    Repl,
    /// Generate a report and print it
    Report(ReportArgs),
    /// Ask one question about a previously analyzed ticker
    Ask(AskArgs),
    /// Check that the backend is reachable
    Health,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Company ticker, e.g. AAPL
    pub ticker: String,

    /// Filing type: 10-K, 10-Q, 8-K
    #[arg(short, long, default_value = "10-K")]
    pub filing_type: FilingType,

    /// Also write {ticker}-{filingType}-report.json
    #[arg(short, long)]
    pub export: bool,

    /// Directory for --export (default: export.directory from config)
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Print the raw report JSON instead of the formatted view
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// Ticker of a report generated earlier
    pub ticker: String,

    /// The question
    pub question: String,
}

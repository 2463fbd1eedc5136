use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::api::HttpFilingApi;
use crate::cli::commands::ReportArgs;
use crate::config::FilingLensConfig;
use crate::errors::FilingLensError;
use crate::repl::progress::{LoadingIndicator, ANALYZING_MESSAGE};
use crate::repl::renderer;
use crate::reporting::{export_json, render_report, write_export};
use crate::session::ReportRequester;
use crate::utils::formatting::format_elapsed;

pub async fn handle_report(args: ReportArgs, config: &FilingLensConfig) -> Result<(), FilingLensError> {
    let api = HttpFilingApi::new(config.base_url());
    let mut page = ReportRequester::new();

    let started = Instant::now();
    let spinner = LoadingIndicator::start(ANALYZING_MESSAGE);
    let submitted = page.generate(&api, &args.ticker, args.filing_type).await;
    spinner.finish();
    submitted.map_err(|r| FilingLensError::InvalidInput(r.to_string()))?;

    if let Some(error) = page.error() {
        return Err(FilingLensError::Backend(error.to_string()));
    }
    let report = page
        .report()
        .ok_or_else(|| FilingLensError::Internal("Report request settled without a result".into()))?;
    info!(elapsed = %format_elapsed(started.elapsed()), "Report generated");

    if args.json {
        println!("{}", export_json(report)?);
    } else {
        println!("{}", render_report(report));
    }

    if args.export {
        let dir = args.export_dir.map(PathBuf::from).unwrap_or_else(|| config.export_dir());
        let path = write_export(report, &dir).await?;
        eprintln!("{}", renderer::render_success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}

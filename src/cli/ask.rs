use crate::api::{FilingApi, HttpFilingApi};
use crate::cli::commands::AskArgs;
use crate::config::FilingLensConfig;
use crate::errors::FilingLensError;
use crate::models::normalize_ticker;
use crate::repl::progress::{LoadingIndicator, THINKING_MESSAGE};
use crate::repl::renderer;
use crate::session::QnaSession;

pub async fn handle_ask(args: AskArgs, config: &FilingLensConfig) -> Result<(), FilingLensError> {
    let ticker = normalize_ticker(&args.ticker)
        .ok_or_else(|| FilingLensError::InvalidInput("Ticker must not be empty".into()))?;
    let api = HttpFilingApi::new(config.base_url());
    let mut session = QnaSession::new(1, &ticker);

    let ticket = session
        .submit(&args.question)
        .map_err(|r| FilingLensError::InvalidInput(r.to_string()))?;

    let spinner = LoadingIndicator::start(THINKING_MESSAGE);
    let outcome = api.ask(ticket.request()).await;
    spinner.finish();

    let failure = outcome.as_ref().err().cloned();
    session.settle(&ticket, outcome);
    println!("{}", renderer::render_transcript(session.transcript()));

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use console::style;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor, ExternalPrinter as _};
use tokio::sync::{mpsc, Mutex, Notify};
use tracing::debug;

use crate::api::FilingApi;
use crate::config::FilingLensConfig;
use crate::errors::FilingLensError;
use crate::models::FilingType;
use crate::repl::banner;
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::events::ClientEvent;
use crate::repl::progress::{LoadingIndicator, ANALYZING_MESSAGE, CHECKING_MESSAGE, THINKING_MESSAGE};
use crate::repl::renderer;
use crate::reporting::{render_report, write_export};
use crate::session::ReportRequester;
use crate::utils::formatting::format_elapsed;

/// Shared state for the REPL session.
struct SessionState {
    page: ReportRequester,
    config: FilingLensConfig,
    /// The main loop is blocked on a request and prints `outbox` itself
    waiting: bool,
    outbox: Vec<String>,
}

impl SessionState {
    fn new(config: FilingLensConfig) -> Self {
        Self {
            page: ReportRequester::new(),
            config,
            waiting: false,
            outbox: Vec::new(),
        }
    }

    fn is_busy(&self, what: WaitFor) -> bool {
        match what {
            WaitFor::Report => self.page.is_loading(),
            WaitFor::Answer => self.page.qna().map_or(false, |q| q.is_loading()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WaitFor {
    Report,
    Answer,
}

/// Resolve once the awaited request has settled. `settled` is signalled by
/// the event task after every applied outcome.
async fn until_settled(state: &Mutex<SessionState>, settled: &Notify, what: WaitFor) {
    loop {
        if !state.lock().await.is_busy(what) {
            return;
        }
        settled.notified().await;
    }
}

/// Run `work` unless `interrupt` fires first. An interrupt future that
/// errors never fires.
async fn until_interrupted<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Option<T> {
    tokio::select! {
        out = work => Some(out),
        Ok(()) = interrupt => None,
    }
}

/// Apply a background outcome to the page and return what to show, if anything.
fn apply_event(page: &mut ReportRequester, event: ClientEvent) -> Option<String> {
    match event {
        ClientEvent::ReportSettled { ticket, outcome } => {
            if !page.settle(&ticket, outcome) {
                return None;
            }
            if let Some(report) = page.report() {
                Some(format!(
                    "{}\n  {}\n",
                    render_report(report),
                    renderer::render_info(renderer::EMPTY_TRANSCRIPT_HINT),
                ))
            } else {
                page.error().map(renderer::render_page_error)
            }
        }
        ClientEvent::AnswerSettled { ticket, outcome } => {
            if !page.settle_question(&ticket, outcome) {
                return None;
            }
            page.qna()
                .and_then(|q| q.transcript().last())
                .map(renderer::render_message)
        }
    }
}

pub struct ReplSession {
    api: Arc<dyn FilingApi>,
    config: FilingLensConfig,
    settled: Arc<Notify>,
}

impl ReplSession {
    pub fn new(api: Arc<dyn FilingApi>, config: FilingLensConfig) -> Self {
        Self { api, config, settled: Arc::new(Notify::new()) }
    }

    pub async fn run(self) -> Result<(), FilingLensError> {
        banner::show_splash(self.api.base_url());

        let state = Arc::new(Mutex::new(SessionState::new(self.config.clone())));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ClientEvent>();

        let config = Config::builder()
            .auto_add_history(true)
            .build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| FilingLensError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::default()));

        // Prints results that arrive while the prompt is active
        let printer = editor.create_external_printer()
            .map_err(|e| FilingLensError::Internal(format!("Failed to create printer: {}", e)))?;
        let printer = Arc::new(Mutex::new(printer));

        let printer_clone = printer.clone();
        let state_clone = state.clone();
        let settled = self.settled.clone();
        let event_task = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                let mut s = state_clone.lock().await;
                let shown = apply_event(&mut s.page, event);
                settled.notify_one();
                let Some(text) = shown else {
                    continue;
                };
                if s.waiting {
                    s.outbox.push(text);
                } else {
                    drop(s);
                    let mut p = printer_clone.lock().await;
                    let _ = p.print(format!("{}\n", text));
                }
            }
        });

        loop {
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking({
                    move || {
                        let term_w = console::Term::stdout().size().1 as usize;
                        let sep = format!("{}", style("─".repeat(term_w)).dim());
                        let prompt = format!("{}\n{} ", sep, style("filing-lens>").cyan().bold());
                        let result = editor.readline(&prompt);
                        (editor, result)
                    }
                })
                .await
                .map_err(|e| FilingLensError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            if self.handle_command(cmd, &state, &event_tx).await {
                                break;
                            }
                        }
                        Err(msg) => {
                            println!("{}", renderer::render_error(&msg));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        // Requests still in flight are abandoned, not cancelled
        event_task.abort();

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    async fn handle_command(
        &self,
        cmd: SlashCommand,
        state: &Arc<Mutex<SessionState>>,
        event_tx: &mpsc::UnboundedSender<ClientEvent>,
    ) -> bool {
        match cmd {
            SlashCommand::Exit => return true,

            SlashCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
            }

            SlashCommand::Help { command } => {
                println!("{}", renderer::render_help(command.as_deref()));
            }

            SlashCommand::Version => {
                println!("{}", renderer::render_version());
            }

            SlashCommand::Analyze { ticker, filing_type } => {
                let filing_type = match filing_type.as_deref().map(str::parse::<FilingType>).transpose() {
                    Ok(ft) => ft.unwrap_or_default(),
                    Err(msg) => {
                        println!("{}", renderer::render_error(&msg));
                        return false;
                    }
                };

                let ticket = {
                    let mut s = state.lock().await;
                    match s.page.submit(&ticker, filing_type) {
                        Ok(ticket) => {
                            s.waiting = true;
                            ticket
                        }
                        Err(rejection) => {
                            println!("{}", renderer::render_error(&rejection.to_string()));
                            return false;
                        }
                    }
                };

                let api = self.api.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let outcome = api.generate_report(ticket.request()).await;
                    let _ = tx.send(ClientEvent::ReportSettled { ticket, outcome });
                });
                self.wait_for(state, WaitFor::Report).await;
            }

            SlashCommand::Ask { question } => {
                let ticket = {
                    let mut s = state.lock().await;
                    match s.page.submit_question(&question) {
                        Ok(ticket) => {
                            s.waiting = true;
                            ticket
                        }
                        Err(rejection) => {
                            println!("{}", renderer::render_error(&rejection.to_string()));
                            return false;
                        }
                    }
                };

                let api = self.api.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let outcome = api.ask(ticket.request()).await;
                    let _ = tx.send(ClientEvent::AnswerSettled { ticket, outcome });
                });
                self.wait_for(state, WaitFor::Answer).await;
            }

            SlashCommand::Report => {
                let s = state.lock().await;
                if s.page.is_loading() {
                    println!("{}", renderer::render_info("A report is being generated."));
                } else if let Some(report) = s.page.report() {
                    println!("{}", render_report(report));
                } else if let Some(error) = s.page.error() {
                    println!("{}", renderer::render_page_error(error));
                } else {
                    println!("{}", renderer::render_info("No report yet. Try /analyze AAPL"));
                }
            }

            SlashCommand::Transcript => {
                let s = state.lock().await;
                match s.page.qna() {
                    Some(qna) => println!("{}", renderer::render_transcript(qna.transcript())),
                    None => println!("{}", renderer::render_info("No report yet. Try /analyze AAPL")),
                }
            }

            SlashCommand::Export { dir } => {
                let s = state.lock().await;
                let Some(report) = s.page.report().cloned() else {
                    println!("{}", renderer::render_info("Nothing to export. Generate a report first."));
                    return false;
                };
                let dir = dir.map(PathBuf::from).unwrap_or_else(|| s.config.export_dir());
                drop(s); // release lock before I/O

                match write_export(&report, &dir).await {
                    Ok(path) => println!(
                        "{}",
                        renderer::render_success(&format!("Exported to {}", path.display()))
                    ),
                    Err(e) => println!("{}", renderer::render_error(&format!("Export failed: {}", e))),
                }
            }

            SlashCommand::Status => {
                let s = state.lock().await;
                let page = &s.page;
                println!(
                    "{}",
                    renderer::render_status(
                        self.api.base_url(),
                        page.is_loading(),
                        page.report().map(|r| (r.ticker.as_str(), r.filing_type.as_str())),
                        page.error(),
                        page.qna().map(|q| (q.transcript().len(), q.is_loading())),
                    )
                );
            }

            SlashCommand::Health => {
                let spinner = LoadingIndicator::start(CHECKING_MESSAGE);
                let probe = until_interrupted(self.api.health(), tokio::signal::ctrl_c()).await;
                spinner.finish();
                match probe {
                    Some(Ok(status)) => {
                        println!("{}", renderer::render_health(self.api.base_url(), &status))
                    }
                    Some(Err(e)) => {
                        println!("{}", renderer::render_error(&format!("Backend unreachable: {}", e)))
                    }
                    None => println!("{}", renderer::render_info("Health check abandoned.")),
                }
            }

            SlashCommand::Config { key, value } => {
                let mut s = state.lock().await;
                match (key.as_deref(), value) {
                    (None, _) => {
                        println!("\n{}\n", style("Settings:").white().bold());
                        println!("  {} = {}", style("base_url").cyan(), style(self.api.base_url()).white());
                        println!("  {} = {}", style("export_dir").cyan(), style(s.config.export_dir().display()).white());
                        println!();
                    }
                    (Some("base_url"), None) => {
                        println!("  {} = {}", style("base_url").cyan(), style(self.api.base_url()).white());
                    }
                    (Some("export_dir"), None) => {
                        println!("  {} = {}", style("export_dir").cyan(), style(s.config.export_dir().display()).white());
                    }
                    (Some("export_dir"), Some(v)) => {
                        s.config.set_export_dir(&v);
                        println!(
                            "{} {} = {}",
                            renderer::render_success("Set"),
                            style("export_dir").cyan(),
                            style(&v).white(),
                        );
                    }
                    (Some("base_url"), Some(_)) => {
                        println!(
                            "{}",
                            renderer::render_error("base_url is fixed for the session; restart with --api-url")
                        );
                    }
                    (Some(k), _) => {
                        println!(
                            "{}",
                            renderer::render_error(&format!("Unknown config key: {}. Valid keys: base_url, export_dir", k))
                        );
                    }
                }
            }
        }

        false
    }

    /// Yield the terminal to a spinner until the request settles. Ctrl-C
    /// returns to the prompt; the request keeps running and its result is
    /// printed when it arrives.
    async fn wait_for(&self, state: &Arc<Mutex<SessionState>>, what: WaitFor) {
        let message = match what {
            WaitFor::Report => ANALYZING_MESSAGE,
            WaitFor::Answer => THINKING_MESSAGE,
        };
        let spinner = LoadingIndicator::start(message);
        let started = Instant::now();
        let interrupted = until_interrupted(
            until_settled(state, &self.settled, what),
            tokio::signal::ctrl_c(),
        )
        .await
        .is_none();
        spinner.finish();
        debug!(?what, elapsed = %format_elapsed(started.elapsed()), interrupted, "Wait ended");

        let outbox = {
            let mut s = state.lock().await;
            s.waiting = false;
            std::mem::take(&mut s.outbox)
        };
        for text in outbox {
            println!("{}", text);
        }
        if interrupted {
            println!(
                "{}",
                renderer::render_info("Still running in the background; the result will show up when it arrives.")
            );
        }
    }
}

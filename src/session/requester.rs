use tracing::{debug, info, warn};

use super::qna::{QnaSession, QuestionTicket};
use super::SubmitRejection;
use crate::api::{ApiError, FilingApi, ReportRequest};
use crate::models::{normalize_ticker, FilingType, Report};

/// Shown when the backend rejects a report without saying why.
pub const REPORT_FAILED_TEXT: &str = "Failed to generate report";
/// Shown when the request itself blew up.
pub const UNEXPECTED_ERROR_TEXT: &str = "An unexpected error occurred.";

/// Human-readable page error for a failed report request.
pub fn report_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { detail: Some(detail), .. } => detail.clone(),
        ApiError::Status { detail: None, .. } => REPORT_FAILED_TEXT.to_string(),
        ApiError::Transport(_) | ApiError::Decode(_) => UNEXPECTED_ERROR_TEXT.to_string(),
    }
}

/// An accepted report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTicket {
    id: u64,
    request: ReportRequest,
}

impl ReportTicket {
    pub fn request(&self) -> &ReportRequest {
        &self.request
    }
}

/// Page-level state: the current report, the current error, whether a report
/// is being generated, and the Q&A session mounted on the current report.
///
/// Every user event has exactly one entry point here.
#[derive(Debug, Default)]
pub struct ReportRequester {
    report: Option<Report>,
    error: Option<String>,
    pending: Option<u64>,
    qna: Option<QnaSession>,
    next_id: u64,
}

impl ReportRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn qna(&self) -> Option<&QnaSession> {
        self.qna.as_ref()
    }

    pub fn qna_mut(&mut self) -> Option<&mut QnaSession> {
        self.qna.as_mut()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Accept a report request. Blank tickers and duplicate submissions are
    /// refused without touching any state.
    pub fn submit(
        &mut self,
        ticker_input: &str,
        filing_type: FilingType,
    ) -> Result<ReportTicket, SubmitRejection> {
        let ticker = normalize_ticker(ticker_input).ok_or(SubmitRejection::EmptyTicker)?;
        if self.pending.is_some() {
            return Err(SubmitRejection::ReportPending);
        }

        let id = self.next_id();
        self.pending = Some(id);
        self.error = None;
        self.report = None;
        if let Some(old) = self.qna.take() {
            debug!(session = old.id(), "Unmounting Q&A session");
        }

        info!(%ticker, %filing_type, "Report requested");
        Ok(ReportTicket {
            id,
            request: ReportRequest { ticker, filing_type },
        })
    }

    /// Apply the outcome of a report request. Returns `false` when the ticket
    /// is not the outstanding one.
    pub fn settle(&mut self, ticket: &ReportTicket, outcome: Result<Report, ApiError>) -> bool {
        if self.pending != Some(ticket.id) {
            debug!(ticket = ticket.id, "Discarding stale report outcome");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(report) => {
                let session_id = self.next_id();
                info!(ticker = %report.ticker, filing_type = %report.filing_type, "Report ready");
                self.qna = Some(QnaSession::new(session_id, &report.ticker));
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                let message = report_error_message(&e);
                warn!(error = %e, "Report request failed");
                self.report = None;
                self.error = Some(message);
            }
        }
        true
    }

    /// Ask a question in the mounted Q&A session.
    pub fn submit_question(&mut self, question: &str) -> Result<QuestionTicket, SubmitRejection> {
        self.qna.as_mut().ok_or(SubmitRejection::NoReport)?.submit(question)
    }

    /// Route an answer to its session. Answers for a session that has since
    /// been unmounted are dropped.
    pub fn settle_question(
        &mut self,
        ticket: &QuestionTicket,
        outcome: Result<String, ApiError>,
    ) -> bool {
        match self.qna.as_mut() {
            Some(session) if session.id() == ticket.session_id() => session.settle(ticket, outcome),
            _ => {
                debug!(session = ticket.session_id(), "Discarding answer for unmounted session");
                false
            }
        }
    }

    /// Submit, wait for the backend and settle in one go.
    pub async fn generate(
        &mut self,
        api: &dyn FilingApi,
        ticker_input: &str,
        filing_type: FilingType,
    ) -> Result<(), SubmitRejection> {
        let ticket = self.submit(ticker_input, filing_type)?;
        let outcome = api.generate_report(ticket.request()).await;
        self.settle(&ticket, outcome);
        Ok(())
    }

    /// Question counterpart of [`ReportRequester::generate`].
    pub async fn ask(&mut self, api: &dyn FilingApi, question: &str) -> Result<(), SubmitRejection> {
        let ticket = self.submit_question(question)?;
        let outcome = api.ask(ticket.request()).await;
        self.settle_question(&ticket, outcome);
        Ok(())
    }
}

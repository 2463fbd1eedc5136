use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use filing_lens::api::{ApiError, FilingApi, HealthStatus, QuestionRequest, ReportRequest};
use filing_lens::models::{FilingType, Message, Report, Sender};
use filing_lens::reporting::kpi_slots;
use filing_lens::session::{
    QnaState, ReportRequester, SubmitRejection, ANSWER_ERROR_TEXT, UNEXPECTED_ERROR_TEXT,
};
use serde_json::json;
use tokio::sync::oneshot;

/// Backend double that replays scripted outcomes and records every call.
#[derive(Default)]
struct ScriptedApi {
    reports: Mutex<VecDeque<Result<Report, ApiError>>>,
    answers: Mutex<VecDeque<Result<String, ApiError>>>,
    report_calls: Mutex<Vec<ReportRequest>>,
    question_calls: Mutex<Vec<QuestionRequest>>,
    /// When set, the next question blocks until the sender fires.
    question_gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
}

impl ScriptedApi {
    fn with_report(self, outcome: Result<Report, ApiError>) -> Self {
        self.reports.lock().unwrap().push_back(outcome);
        self
    }

    fn with_answer(self, outcome: Result<String, ApiError>) -> Self {
        self.answers.lock().unwrap().push_back(outcome);
        self
    }

    async fn gate_next_question(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.question_gate.lock().await = Some(rx);
        tx
    }

    fn report_calls(&self) -> Vec<ReportRequest> {
        self.report_calls.lock().unwrap().clone()
    }

    fn question_calls(&self) -> Vec<QuestionRequest> {
        self.question_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FilingApi for ScriptedApi {
    async fn generate_report(&self, request: &ReportRequest) -> Result<Report, ApiError> {
        self.report_calls.lock().unwrap().push(request.clone());
        self.reports
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted report".into())))
    }

    async fn ask(&self, request: &QuestionRequest) -> Result<String, ApiError> {
        self.question_calls.lock().unwrap().push(request.clone());
        let gate = self.question_gate.lock().await.take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted answer".into())))
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus { status: "ok".into(), message: None })
    }

    fn base_url(&self) -> &str {
        "scripted://"
    }
}

fn apple_report() -> Report {
    serde_json::from_value(json!({
        "ticker": "AAPL",
        "filingType": "10-K",
        "executiveSummary": "Apple delivered record services revenue.",
        "riskFactors": ["Supply chain concentration", "Regulatory scrutiny"],
        "financialKPIs": { "total_revenue": "$383.3B", "net_income": "$97.0B" }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_whitespace_ticker_issues_no_request() {
    let api = ScriptedApi::default();
    let mut page = ReportRequester::new();

    for input in ["", "   ", "\t"] {
        let result = page.generate(&api, input, FilingType::TenK).await;
        assert_eq!(result.unwrap_err(), SubmitRejection::EmptyTicker);
    }

    assert!(api.report_calls().is_empty());
    assert!(!page.is_loading());
    assert!(page.report().is_none());
    assert!(page.error().is_none());
}

#[tokio::test]
async fn test_ticker_sent_normalized() {
    let api = ScriptedApi::default().with_report(Ok(apple_report()));
    let mut page = ReportRequester::new();

    page.generate(&api, " aapl ", FilingType::TenK).await.unwrap();

    let calls = api.report_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].ticker, "AAPL");
    assert_eq!(calls[0].filing_type, FilingType::TenK);
    assert_eq!(page.report(), Some(&apple_report()));
}

#[tokio::test]
async fn test_missing_kpi_shows_placeholder_after_success() {
    let api = ScriptedApi::default().with_report(Ok(apple_report()));
    let mut page = ReportRequester::new();
    page.generate(&api, "AAPL", FilingType::TenK).await.unwrap();

    let slots = kpi_slots(page.report().unwrap());
    assert_eq!(slots[0].value, "$383.3B");
    assert_eq!(slots[2].label, "Earnings Per Share (EPS)");
    assert_eq!(slots[2].value, "N/A");
}

#[tokio::test]
async fn test_network_failure_surfaces_generic_error() {
    let api = ScriptedApi::default().with_report(Err(ApiError::Transport("connection refused".into())));
    let mut page = ReportRequester::new();

    page.generate(&api, "AAPL", FilingType::TenK).await.unwrap();

    assert_eq!(page.error(), Some(UNEXPECTED_ERROR_TEXT));
    assert!(!page.is_loading());
    assert!(page.report().is_none());
}

#[tokio::test]
async fn test_new_report_replaces_old_one_wholesale() {
    let mut msft = apple_report();
    msft.ticker = "MSFT".into();
    msft.risk_factors = vec![json!("Cloud competition")];
    let api = ScriptedApi::default()
        .with_report(Ok(apple_report()))
        .with_answer(Ok("About $383B.".into()))
        .with_report(Ok(msft.clone()));
    let mut page = ReportRequester::new();

    page.generate(&api, "AAPL", FilingType::TenK).await.unwrap();
    page.ask(&api, "Revenue?").await.unwrap();
    assert_eq!(page.qna().unwrap().transcript().len(), 2);

    page.generate(&api, "MSFT", FilingType::TenK).await.unwrap();
    assert_eq!(page.report(), Some(&msft));
    assert_eq!(page.qna().unwrap().ticker(), "MSFT");
    assert!(page.qna().unwrap().transcript().is_empty());
}

#[tokio::test]
async fn test_question_appends_exactly_one_answer_on_success() {
    let api = ScriptedApi::default()
        .with_report(Ok(apple_report()))
        .with_answer(Ok("Total net sales were $383.3 billion.".into()));
    let mut page = ReportRequester::new();
    page.generate(&api, "AAPL", FilingType::TenK).await.unwrap();

    page.ask(&api, "What were total revenues?").await.unwrap();

    let transcript = page.qna().unwrap().transcript();
    assert_eq!(
        transcript,
        &[
            Message::user("What were total revenues?"),
            Message::ai("Total net sales were $383.3 billion."),
        ]
    );
    assert_eq!(api.question_calls()[0].ticker, "AAPL");
}

#[tokio::test]
async fn test_question_failure_is_conversational() {
    let api = ScriptedApi::default()
        .with_report(Ok(apple_report()))
        .with_answer(Err(ApiError::Status { status: 404, detail: Some("Vector store not found".into()) }));
    let mut page = ReportRequester::new();
    page.generate(&api, "AAPL", FilingType::TenK).await.unwrap();

    page.ask(&api, "What were total revenues?").await.unwrap();

    let transcript = page.qna().unwrap().transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1], Message::ai(ANSWER_ERROR_TEXT));
    // Page-level state is untouched by question failures
    assert!(page.error().is_none());
    assert!(page.report().is_some());
}

#[tokio::test]
async fn test_second_question_rejected_while_first_pending() {
    let api = Arc::new(
        ScriptedApi::default()
            .with_report(Ok(apple_report()))
            .with_answer(Ok("First answer".into())),
    );
    let mut page = ReportRequester::new();
    page.generate(&*api, "AAPL", FilingType::TenK).await.unwrap();

    let release = api.gate_next_question().await;
    let ticket = page.submit_question("What were total revenues?").unwrap();

    // User message is visible before any response
    let session = page.qna().unwrap();
    assert_eq!(session.state(), QnaState::AwaitingAnswer);
    assert_eq!(session.transcript(), &[Message::user("What were total revenues?")]);

    let in_flight = {
        let api = api.clone();
        let request = ticket.request().clone();
        tokio::spawn(async move { api.ask(&request).await })
    };

    assert_eq!(
        page.submit_question("And net income?").unwrap_err(),
        SubmitRejection::QuestionPending
    );

    release.send(()).unwrap();
    let outcome = in_flight.await.unwrap();
    assert!(page.settle_question(&ticket, outcome));

    assert_eq!(api.question_calls().len(), 1);
    let transcript = page.qna().unwrap().transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].sender, Sender::Ai);
    assert_eq!(page.qna().unwrap().state(), QnaState::Idle);

    // Idle again: the next question goes through
    assert!(page.submit_question("And net income?").is_ok());
}

#[tokio::test]
async fn test_answer_for_unmounted_session_is_discarded() {
    let mut msft = apple_report();
    msft.ticker = "MSFT".into();
    let api = Arc::new(
        ScriptedApi::default()
            .with_report(Ok(apple_report()))
            .with_report(Ok(msft))
            .with_answer(Ok("Stale AAPL answer".into())),
    );
    let mut page = ReportRequester::new();
    page.generate(&*api, "AAPL", FilingType::TenK).await.unwrap();

    let release = api.gate_next_question().await;
    let ticket = page.submit_question("Revenue?").unwrap();
    let in_flight = {
        let api = api.clone();
        let request = ticket.request().clone();
        tokio::spawn(async move { api.ask(&request).await })
    };

    // User starts a new report while the question is still out
    page.generate(&*api, "MSFT", FilingType::TenQ).await.unwrap();

    release.send(()).unwrap();
    let outcome = in_flight.await.unwrap();
    assert!(outcome.is_ok());
    assert!(!page.settle_question(&ticket, outcome));

    let session = page.qna().unwrap();
    assert_eq!(session.ticker(), "MSFT");
    assert!(session.transcript().is_empty());
    assert_eq!(session.state(), QnaState::Idle);
    assert_eq!(page.report().unwrap().ticker, "MSFT");
}

#[tokio::test]
async fn test_report_request_while_pending_is_rejected() {
    let api = ScriptedApi::default();
    let mut page = ReportRequester::new();

    let ticket = page.submit("AAPL", FilingType::TenK).unwrap();
    assert_eq!(page.generate(&api, "MSFT", FilingType::TenK).await.unwrap_err(), SubmitRejection::ReportPending);
    assert!(api.report_calls().is_empty());

    page.settle(&ticket, Ok(apple_report()));
    assert!(!page.is_loading());
}

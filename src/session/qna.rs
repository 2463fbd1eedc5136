use tracing::debug;

use super::SubmitRejection;
use crate::api::{ApiError, FilingApi, QuestionRequest};
use crate::models::Message;

/// Transcript text appended when a question fails for any reason.
pub const ANSWER_ERROR_TEXT: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QnaState {
    Idle,
    AwaitingAnswer,
}

/// Proof that a question was accepted; hand it back to [`QnaSession::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTicket {
    session_id: u64,
    seq: u64,
    request: QuestionRequest,
}

impl QuestionTicket {
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn request(&self) -> &QuestionRequest {
        &self.request
    }
}

/// Follow-up chat bound to one report's ticker.
///
/// Only one question may be in flight. The transcript only ever grows; it is
/// dropped together with the session when a new report is requested.
#[derive(Debug)]
pub struct QnaSession {
    id: u64,
    ticker: String,
    transcript: Vec<Message>,
    state: QnaState,
    asked: u64,
}

impl QnaSession {
    pub fn new(id: u64, ticker: &str) -> Self {
        Self {
            id,
            ticker: ticker.to_string(),
            transcript: Vec::new(),
            state: QnaState::Idle,
            asked: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> QnaState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == QnaState::AwaitingAnswer
    }

    /// Accept a question: the user message is appended immediately and the
    /// session waits for its answer.
    pub fn submit(&mut self, question: &str) -> Result<QuestionTicket, SubmitRejection> {
        if question.trim().is_empty() {
            return Err(SubmitRejection::EmptyQuestion);
        }
        if self.state == QnaState::AwaitingAnswer {
            return Err(SubmitRejection::QuestionPending);
        }

        self.transcript.push(Message::user(question));
        self.state = QnaState::AwaitingAnswer;
        self.asked += 1;
        debug!(session = self.id, ticker = %self.ticker, "Question submitted");

        Ok(QuestionTicket {
            session_id: self.id,
            seq: self.asked,
            request: QuestionRequest {
                ticker: self.ticker.clone(),
                question: question.to_string(),
            },
        })
    }

    /// Apply the outcome of a question. Returns `false` if the ticket does not
    /// belong to the question this session is waiting on.
    pub fn settle(&mut self, ticket: &QuestionTicket, outcome: Result<String, ApiError>) -> bool {
        let expected = ticket.session_id == self.id && ticket.seq == self.asked;
        if !expected || self.state != QnaState::AwaitingAnswer {
            debug!(session = self.id, ticket_session = ticket.session_id, "Ignoring unexpected answer");
            return false;
        }

        let text = match outcome {
            Ok(answer) => answer,
            Err(e) => {
                debug!(session = self.id, error = %e, "Question failed");
                ANSWER_ERROR_TEXT.to_string()
            }
        };
        self.transcript.push(Message::ai(&text));
        self.state = QnaState::Idle;
        true
    }

    /// Submit, wait for the backend and settle in one go.
    pub async fn ask(&mut self, api: &dyn FilingApi, question: &str) -> Result<(), SubmitRejection> {
        let ticket = self.submit(question)?;
        let outcome = api.ask(ticket.request()).await;
        self.settle(&ticket, outcome);
        Ok(())
    }
}

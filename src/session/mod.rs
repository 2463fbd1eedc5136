pub mod qna;
pub mod requester;

pub use qna::{QnaSession, QnaState, QuestionTicket, ANSWER_ERROR_TEXT};
pub use requester::{
    report_error_message, ReportRequester, ReportTicket, REPORT_FAILED_TEXT, UNEXPECTED_ERROR_TEXT,
};

use thiserror::Error;

/// Why a submission was refused before any request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("Please enter a ticker.")]
    EmptyTicker,

    #[error("A report is already being generated.")]
    ReportPending,

    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("Still waiting for the previous answer.")]
    QuestionPending,

    #[error("Generate a report before asking questions.")]
    NoReport,
}

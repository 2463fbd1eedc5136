use crate::api::ApiError;
use crate::models::Report;
use crate::session::{QuestionTicket, ReportTicket};

/// Outcomes of background requests, delivered back to the REPL.
#[derive(Debug)]
pub enum ClientEvent {
    /// A report request settled
    ReportSettled {
        ticket: ReportTicket,
        outcome: Result<Report, ApiError>,
    },
    /// A question request settled
    AnswerSettled {
        ticket: QuestionTicket,
        outcome: Result<String, ApiError>,
    },
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::FilingType;

/// Body of `POST /api/generate-report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub ticker: String,
    pub filing_type: FilingType,
}

/// Body of `POST /api/qna`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub ticker: String,
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape of the backend. FastAPI validation errors put a list in
/// `detail`, so only a string counts as a message.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    pub(crate) fn parse_detail(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::errors::ApiError;
use super::types::{AnswerResponse, ErrorBody, HealthStatus, QuestionRequest, ReportRequest};
use crate::models::Report;

/// The analysis backend, as seen from the client.
#[async_trait]
pub trait FilingApi: Send + Sync {
    /// `POST /api/generate-report`
    async fn generate_report(&self, request: &ReportRequest) -> Result<Report, ApiError>;

    /// `POST /api/qna`, returning the answer text
    async fn ask(&self, request: &QuestionRequest) -> Result<String, ApiError>;

    /// `GET /`
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// Base URL, for display
    fn base_url(&self) -> &str;
}

pub struct HttpFilingApi {
    client: Client,
    base_url: String,
}

impl HttpFilingApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl FilingApi for HttpFilingApi {
    async fn generate_report(&self, request: &ReportRequest) -> Result<Report, ApiError> {
        let url = self.endpoint("/api/generate-report");
        info!(ticker = %request.ticker, filing_type = %request.filing_type, "Requesting report");

        let resp = self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = ErrorBody::parse_detail(&body);
            warn!(status = status.as_u16(), detail = ?detail, "Report generation failed");
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }

        let report: Report = resp.json().await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!(ticker = %report.ticker, risks = report.risk_factors.len(), "Report received");
        Ok(report)
    }

    async fn ask(&self, request: &QuestionRequest) -> Result<String, ApiError> {
        let url = self.endpoint("/api/qna");
        debug!(ticker = %request.ticker, "Sending question");

        let resp = self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Question failed");
            return Err(ApiError::Status { status: status.as_u16(), detail: None });
        }

        let data: AnswerResponse = resp.json().await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(data.answer)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let resp = self.client
            .get(self.endpoint("/"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), detail: None });
        }

        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

//! HTTP client for the analysis service.

use serde::Serialize;

use clinical_timeline_core::{AnalysisService, EventAnalysis, ServiceError, ServiceResult};

use crate::payload::parse_analysis_payload;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocking HTTP client for the exam-analysis endpoint.
pub struct HttpAnalysisClient {
    endpoint: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAnalysisClient {
    /// Create a client for an analysis endpoint.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client with the default timeout.
    pub fn with_default_timeout(endpoint: &str) -> Self {
        Self::new(endpoint, DEFAULT_TIMEOUT_SECS)
    }
}

/// Request body for the analysis endpoint.
#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    #[serde(rename = "fileUrl")]
    file_url: &'a str,
}

impl AnalysisService for HttpAnalysisClient {
    fn analyze(&self, file_url: &str) -> ServiceResult<EventAnalysis> {
        let body = AnalyzeRequest { file_url };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ServiceError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    ServiceError::Timeout(self.timeout_secs)
                } else {
                    ServiceError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        parse_analysis_payload(&text).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

/// Mock analysis client for testing. Returns a configurable result.
pub struct MockAnalysisClient {
    response: Option<EventAnalysis>,
    calls: std::cell::Cell<usize>,
}

impl MockAnalysisClient {
    /// Mock that answers every call with the given analysis.
    pub fn returning(analysis: EventAnalysis) -> Self {
        Self {
            response: Some(analysis),
            calls: std::cell::Cell::new(0),
        }
    }

    /// Mock that fails every call, as an unreachable service would.
    pub fn unavailable() -> Self {
        Self {
            response: None,
            calls: std::cell::Cell::new(0),
        }
    }

    /// Number of analyze calls received.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl AnalysisService for MockAnalysisClient {
    fn analyze(&self, file_url: &str) -> ServiceResult<EventAnalysis> {
        self.calls.set(self.calls.get() + 1);
        match &self.response {
            Some(analysis) => Ok(analysis.clone()),
            None => Err(ServiceError::Connection(file_url.to_string())),
        }
    }
}

//! Seam for the external document-analysis service.

use thiserror::Error;

use crate::models::EventAnalysis;

/// Analysis-service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("could not reach the analysis service at {0}")]
    Connection(String),

    #[error("analysis request timed out after {0}s")]
    Timeout(u64),

    #[error("analysis service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unusable analysis response: {0}")]
    InvalidResponse(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// External analysis of an uploaded exam file.
///
/// Implementations take a dereferenceable file URL and return whatever lab
/// values the service could read out of the document. There is no schema
/// guarantee: a malformed response surfaces as an error, which callers treat
/// as "no analysis".
pub trait AnalysisService {
    fn analyze(&self, file_url: &str) -> ServiceResult<EventAnalysis>;
}

impl<S: AnalysisService + ?Sized> AnalysisService for &S {
    fn analyze(&self, file_url: &str) -> ServiceResult<EventAnalysis> {
        (**self).analyze(file_url)
    }
}

//! Analysis-service response parsing.

use thiserror::Error;

use clinical_timeline_core::EventAnalysis;

/// Payload errors.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("no JSON object found in response")]
    NoJsonObject,
}

pub type PayloadResult<T> = Result<T, PayloadError>;

/// Parse a service response into an analysis.
///
/// The service is not guaranteed to answer with bare JSON, so the parse
/// takes the slice between the first `{` and the last `}` before
/// deserializing. Unknown fields are ignored; missing fields stay unset.
pub fn parse_analysis_payload(raw: &str) -> PayloadResult<EventAnalysis> {
    let start = raw.find('{').ok_or(PayloadError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(PayloadError::NoJsonObject)?;
    if end < start {
        return Err(PayloadError::NoJsonObject);
    }

    let analysis: EventAnalysis = serde_json::from_str(&raw[start..=end])?;
    Ok(analysis)
}

//! Analysis resolution for new events.
//!
//! Pipeline: text scan → external analysis fallback → optional result.

mod scanner;

pub use scanner::*;

use tracing::{debug, warn};

use crate::models::{EventAnalysis, NOTE_EXTERNAL_ANALYSIS};
use crate::service::AnalysisService;

/// Resolves the analysis for one event.
///
/// The text scanner runs first and always wins, even on a partial match. The
/// external service is consulted only when the scan found nothing AND a file
/// was attached. Service failures degrade to "no analysis"; this type never
/// returns an error.
pub struct AnalysisResolver<'a, S: AnalysisService> {
    service: &'a S,
}

impl<'a, S: AnalysisService> AnalysisResolver<'a, S> {
    /// Create a new resolver over an analysis service.
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Resolve the analysis for an event's details text and optional file.
    pub fn resolve(&self, details: &str, file_url: Option<&str>) -> Option<EventAnalysis> {
        if let Some(analysis) = scan_text(details) {
            return Some(analysis);
        }

        let url = file_url?;
        match self.service.analyze(url) {
            Ok(analysis) if analysis.has_values() => {
                let mut analysis = analysis;
                if analysis.notes.is_none() {
                    analysis.notes = Some(NOTE_EXTERNAL_ANALYSIS.into());
                }
                Some(analysis)
            }
            Ok(_) => {
                debug!(url, "external analysis returned no lab values");
                None
            }
            Err(err) => {
                warn!(url, error = %err, "external analysis failed, event proceeds without values");
                None
            }
        }
    }
}

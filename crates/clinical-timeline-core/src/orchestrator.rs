//! Request-scoped add-event pipeline.
//!
//! Sequence per request: validate → upload file → resolve analysis → merge
//! series → append event → persist → commit. State lives in a single
//! [`TimelineState`] value that is replaced wholesale after a successful
//! save; a failed save discards the pending snapshot, so observable state
//! always matches the last persisted document.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{EventAnalysis, EventItem, ExamPoint};
use crate::resolver::AnalysisResolver;
use crate::series::{explain_leukocytes, ExamSeries, MergeError};
use crate::service::AnalysisService;
use crate::store::{FileStore, StoreError, TimelineStore};

/// User-visible warning when the file upload fails.
pub const WARN_UPLOAD_FAILED: &str = "Falha no upload do arquivo.";

/// User-visible warning when a partial analysis cannot start the series.
pub const WARN_INCOMPLETE_BOOTSTRAP: &str =
    "Exames incompletos para iniciar a série; gráfico não atualizado.";

/// Add-event errors. Upload and analysis failures are not here: those
/// degrade to warnings instead of aborting the operation.
#[derive(Error, Debug)]
pub enum AddEventError {
    #[error("event date is required")]
    MissingDate,

    #[error("event label is required")]
    MissingEvent,

    #[error("event date is not a valid YYYY-MM-DD date: {0}")]
    InvalidDate(String),

    #[error("could not persist the timeline: {0}")]
    Persistence(#[source] StoreError),
}

pub type AddEventResult<T> = Result<T, AddEventError>;

/// A file handed in with a new event.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A new-event request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    /// Event date (YYYY-MM-DD); required
    pub date: String,
    /// Short event label; required
    pub event: String,
    /// Free-text details; may be empty
    pub details: String,
    /// Optional exam file
    pub attachment: Option<Attachment>,
}

/// Result of a successful add-event operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AddEventOutcome {
    /// The event as appended and persisted
    pub event: EventItem,
    /// User-visible degradation warnings (failed upload, skipped bootstrap)
    pub warnings: Vec<String>,
    /// Whether the exam series gained a point
    pub series_updated: bool,
}

/// The full observable state: timeline, exam series, trend explanation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineState {
    pub timeline: Vec<EventItem>,
    pub series: ExamSeries,
    pub explanation: String,
}

impl TimelineState {
    /// Empty state: no events, no series, no explanation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reference dataset used when no stored timeline can be read: one
    /// admission event and the exam point its hemogram produced.
    pub fn seeded() -> Self {
        Self {
            timeline: vec![EventItem {
                date: "2025-08-12".into(),
                event: "Internação por desidratação".into(),
                details: "Pressão baixa, taquicardia, vômitos".into(),
                file_url: None,
                analysis: None,
            }],
            series: ExamSeries::from_points(vec![ExamPoint::new(
                "2025-08-12",
                60.0,
                1.6,
                13800.0,
            )]),
            explanation:
                "Hemograma: leucócitos elevados (13.800/µL) → indica resposta inflamatória."
                    .into(),
        }
    }
}

/// Owns the collaborators and the current state, and runs the add-event
/// pipeline. `&mut self` makes it a single writer within the process.
pub struct TimelineOrchestrator<V, A>
where
    V: TimelineStore + FileStore,
    A: AnalysisService,
{
    vault: V,
    service: A,
    state: TimelineState,
}

impl<V, A> TimelineOrchestrator<V, A>
where
    V: TimelineStore + FileStore,
    A: AnalysisService,
{
    /// Create an orchestrator over explicit initial state.
    pub fn new(vault: V, service: A, state: TimelineState) -> Self {
        Self {
            vault,
            service,
            state,
        }
    }

    /// Create an orchestrator from the stored timeline.
    ///
    /// A missing document yields an empty timeline; a failed load keeps the
    /// seeded timeline. The exam series and explanation always start from
    /// the seeded reference dataset: only the event list is persisted.
    pub fn load(vault: V, service: A) -> Self {
        let mut state = TimelineState::seeded();
        match vault.load() {
            Ok(Some(timeline)) => state.timeline = timeline,
            Ok(None) => state.timeline = Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not load stored timeline, starting from seeded state");
            }
        }
        Self::new(vault, service, state)
    }

    /// Current state.
    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Current timeline, in insertion order.
    pub fn timeline(&self) -> &[EventItem] {
        &self.state.timeline
    }

    /// Current exam series.
    pub fn series(&self) -> &ExamSeries {
        &self.state.series
    }

    /// Current trend explanation.
    pub fn explanation(&self) -> &str {
        &self.state.explanation
    }

    /// Run the add-event pipeline.
    ///
    /// Validation and persistence failures abort with prior state intact;
    /// upload and analysis failures degrade to warnings on the outcome.
    pub fn add_event(&mut self, request: NewEvent) -> AddEventResult<AddEventOutcome> {
        validate(&request)?;
        let mut warnings = Vec::new();

        // Upload before analysis so the fallback path has a URL to hand over.
        let file_url = match &request.attachment {
            Some(attachment) => match self.vault.upload(&attachment.name, &attachment.bytes) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!(name = %attachment.name, error = %err, "file upload failed, event proceeds without file");
                    warnings.push(WARN_UPLOAD_FAILED.to_string());
                    None
                }
            },
            None => None,
        };

        let resolver = AnalysisResolver::new(&self.service);
        let analysis = resolver.resolve(&request.details, file_url.as_deref());

        let (next_series, next_explanation, series_updated) =
            self.merge_step(&request.date, analysis.as_ref(), &mut warnings);

        let event = EventItem {
            date: request.date,
            event: request.event,
            details: request.details,
            file_url,
            analysis,
        };

        let mut next_timeline = self.state.timeline.clone();
        next_timeline.push(event.clone());

        self.vault
            .save(&next_timeline)
            .map_err(AddEventError::Persistence)?;

        self.state = TimelineState {
            timeline: next_timeline,
            series: next_series,
            explanation: next_explanation,
        };

        Ok(AddEventOutcome {
            event,
            warnings,
            series_updated,
        })
    }

    /// Merge the analysis into the series and refresh the explanation.
    ///
    /// Returns the candidate series/explanation for the pending snapshot;
    /// self.state is not touched here.
    fn merge_step(
        &self,
        date: &str,
        analysis: Option<&EventAnalysis>,
        warnings: &mut Vec<String>,
    ) -> (ExamSeries, String, bool) {
        let unchanged = (
            self.state.series.clone(),
            self.state.explanation.clone(),
            false,
        );

        let Some(analysis) = analysis else {
            return unchanged;
        };
        if !analysis.has_values() {
            return unchanged;
        }

        match self.state.series.merged(date, analysis) {
            Ok(series) => {
                let explanation = match (self.state.series.last(), analysis.leukocytes) {
                    (Some(previous), Some(current)) => {
                        explain_leukocytes(previous.leukocytes, current)
                    }
                    _ => self.state.explanation.clone(),
                };
                (series, explanation, true)
            }
            Err(MergeError::IncompleteBootstrap) => {
                warn!(date, "partial analysis cannot bootstrap an empty series");
                warnings.push(WARN_INCOMPLETE_BOOTSTRAP.to_string());
                unchanged
            }
            Err(MergeError::EmptyUpdate) => {
                // has_values above makes this unreachable in practice
                debug!(date, "analysis had no values at merge time");
                unchanged
            }
        }
    }
}

/// Check required fields before any I/O happens.
fn validate(request: &NewEvent) -> AddEventResult<()> {
    if request.date.trim().is_empty() {
        return Err(AddEventError::MissingDate);
    }
    if request.event.trim().is_empty() {
        return Err(AddEventError::MissingEvent);
    }
    if NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").is_err() {
        return Err(AddEventError::InvalidDate(request.date.clone()));
    }
    Ok(())
}

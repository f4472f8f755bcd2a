//! Clinical-Timeline Core Library
//!
//! Patient event timeline with a derived lab-value time series.
//!
//! # Architecture
//!
//! ```text
//! New event (date, label, details, file?)
//!         │
//!         ▼
//!  Upload file ──────────► FileStore (vault)
//!         │
//!         ▼
//!  AnalysisResolver
//!    ├─ text scan (ureia / creatinina / leucócitos)
//!    └─ fallback: AnalysisService(file URL)   [only on scan miss + file]
//!         │
//!         ▼
//!  ExamSeries merge (carry-forward of unset fields)
//!         │
//!         ▼
//!  Trend narration (leukocyte comparison)
//!         │
//!         ▼
//!  Append event → persist full timeline ──► TimelineStore (vault)
//! ```
//!
//! # Core Principle
//!
//! **Degrade, don't abort.** A failed upload or analysis call downgrades the
//! event (no file / no values); only validation and persistence failures
//! reject an add-event request.
//!
//! # Modules
//!
//! - [`db`]: SQLite layer backing the local vault
//! - [`models`]: Domain types (EventItem, EventAnalysis, ExamPoint, etc.)
//! - [`orchestrator`]: Request-scoped add-event pipeline over [`TimelineState`]
//! - [`resolver`]: Text scanner + external-analysis fallback
//! - [`series`]: Carry-forward exam series and trend narration
//! - [`service`]: Analysis-service seam
//! - [`store`]: Storage seams and the SQLite vault

pub mod db;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod series;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    Biomarker, EventAnalysis, EventItem, ExamPoint, NOTE_EXTERNAL_ANALYSIS,
    NOTE_READ_FROM_DETAILS,
};
pub use orchestrator::{
    AddEventError, AddEventOutcome, Attachment, NewEvent, TimelineOrchestrator, TimelineState,
};
pub use resolver::{scan_text, AnalysisResolver, FieldScan};
pub use series::{explain_leukocytes, ExamSeries, MergeError};
pub use service::{AnalysisService, ServiceError, ServiceResult};
pub use store::{FileStore, SqliteVault, StoreError, TimelineStore, EVENTS_KEY};

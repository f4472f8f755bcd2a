//! Timeline event models.
//!
//! Serde field names keep the wire spelling of the persisted document
//! (`ureia`, `creatinina`, `leucocitos`, `notas`, `fileUrl`) so existing
//! timeline documents stay readable.

use serde::{Deserialize, Serialize};

/// Provenance note for values read out of the details text.
pub const NOTE_READ_FROM_DETAILS: &str = "Valores lidos do campo Detalhes.";

/// Provenance note for values obtained from the external analysis service.
pub const NOTE_EXTERNAL_ANALYSIS: &str = "Valores informados pela análise externa.";

/// The three tracked lab values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biomarker {
    Urea,
    Creatinine,
    Leukocytes,
}

impl Biomarker {
    /// All biomarkers, in scan order.
    pub const ALL: [Biomarker; 3] = [
        Biomarker::Urea,
        Biomarker::Creatinine,
        Biomarker::Leukocytes,
    ];

    /// Label spellings to search for in case/diacritic-folded text.
    ///
    /// `leucocito` is a prefix of the plural, so one entry covers both
    /// spellings; `urea` covers the Latin short form next to the Portuguese
    /// `ureia`/`uréia`.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Biomarker::Urea => &["ureia", "urea"],
            Biomarker::Creatinine => &["creatinina"],
            Biomarker::Leukocytes => &["leucocito"],
        }
    }

    /// Read this biomarker's field out of an analysis.
    pub fn get(self, analysis: &EventAnalysis) -> Option<f64> {
        match self {
            Biomarker::Urea => analysis.urea,
            Biomarker::Creatinine => analysis.creatinine,
            Biomarker::Leukocytes => analysis.leukocytes,
        }
    }

    /// Write this biomarker's field into an analysis.
    pub fn set(self, analysis: &mut EventAnalysis, value: f64) {
        match self {
            Biomarker::Urea => analysis.urea = Some(value),
            Biomarker::Creatinine => analysis.creatinine = Some(value),
            Biomarker::Leukocytes => analysis.leukocytes = Some(value),
        }
    }
}

/// Lab values (and provenance note) associated with one event.
///
/// Zero or more fields set; `notes` records how the values were obtained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventAnalysis {
    /// Urea (mg/dL)
    #[serde(rename = "ureia", skip_serializing_if = "Option::is_none")]
    pub urea: Option<f64>,
    /// Creatinine (mg/dL)
    #[serde(rename = "creatinina", skip_serializing_if = "Option::is_none")]
    pub creatinine: Option<f64>,
    /// Leukocyte count (/µL)
    #[serde(rename = "leucocitos", skip_serializing_if = "Option::is_none")]
    pub leukocytes: Option<f64>,
    /// Provenance note
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EventAnalysis {
    /// True if at least one lab value is set.
    pub fn has_values(&self) -> bool {
        Biomarker::ALL.iter().any(|b| b.get(self).is_some())
    }

    /// True if all three lab values are set.
    pub fn is_complete(&self) -> bool {
        Biomarker::ALL.iter().all(|b| b.get(self).is_some())
    }
}

/// One timeline entry.
///
/// `date` and `event` are required non-empty strings. `file_url` and
/// `analysis` are independent: an event may have a file with no analysis, or
/// analysis with no file. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventItem {
    /// Event date (YYYY-MM-DD)
    pub date: String,
    /// Short event label
    pub event: String,
    /// Free-text details; may be empty
    pub details: String,
    /// URL of the uploaded exam file, if any
    #[serde(rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Extracted or externally informed lab values, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<EventAnalysis>,
}

//! Exam time-series models.

use serde::{Deserialize, Serialize};

/// One row of the lab-value time series.
///
/// All three readings are always present: a point is built either from a
/// complete analysis or by carrying unset fields forward from the previous
/// point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamPoint {
    /// Reading date (YYYY-MM-DD)
    pub date: String,
    /// Urea (mg/dL)
    #[serde(rename = "ureia")]
    pub urea: f64,
    /// Creatinine (mg/dL)
    #[serde(rename = "creatinina")]
    pub creatinine: f64,
    /// Leukocyte count (/µL)
    #[serde(rename = "leucocitos")]
    pub leukocytes: f64,
}

impl ExamPoint {
    /// Create a point with all three readings.
    pub fn new(date: impl Into<String>, urea: f64, creatinine: f64, leukocytes: f64) -> Self {
        Self {
            date: date.into(),
            urea,
            creatinine,
            leukocytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let point = ExamPoint::new("2025-08-12", 60.0, 1.6, 13800.0);
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"ureia\":60"));
        assert!(json.contains("\"creatinina\":1.6"));
        assert!(json.contains("\"leucocitos\":13800"));

        let back: ExamPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}

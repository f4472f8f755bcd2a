//! Exam-series merging with carry-forward.

mod narrator;

pub use narrator::*;

use thiserror::Error;

use crate::models::{EventAnalysis, ExamPoint};

/// Merge errors.
#[derive(Error, Debug, PartialEq)]
pub enum MergeError {
    /// The update carries none of the three lab values.
    #[error("analysis update carries no lab values")]
    EmptyUpdate,

    /// The series is empty and the update is missing at least one value, so
    /// there is nothing to carry forward.
    #[error("first exam point needs urea, creatinine and leukocytes together")]
    IncompleteBootstrap,
}

pub type MergeResult<T> = Result<T, MergeError>;

/// Ordered exam-point series.
///
/// Never mutated in place: [`ExamSeries::merged`] returns a new series with
/// exactly one additional trailing point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamSeries {
    points: Vec<ExamPoint>,
}

impl ExamSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a series from existing points.
    pub fn from_points(points: Vec<ExamPoint>) -> Self {
        Self { points }
    }

    /// All points, in insertion order.
    pub fn points(&self) -> &[ExamPoint] {
        &self.points
    }

    /// The most recent point, if any.
    pub fn last(&self) -> Option<&ExamPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Produce a new series with one point appended.
    ///
    /// Each field of the new point takes the update's value when set, else
    /// the value of the current last point. The point's date is the event's
    /// date; dates are not required to be monotonic. An empty series accepts
    /// only a complete update (nothing to carry forward).
    pub fn merged(&self, date: &str, update: &EventAnalysis) -> MergeResult<ExamSeries> {
        if !update.has_values() {
            return Err(MergeError::EmptyUpdate);
        }

        let point = match self.points.last() {
            Some(last) => ExamPoint::new(
                date,
                update.urea.unwrap_or(last.urea),
                update.creatinine.unwrap_or(last.creatinine),
                update.leukocytes.unwrap_or(last.leukocytes),
            ),
            None => {
                if !update.is_complete() {
                    return Err(MergeError::IncompleteBootstrap);
                }
                // is_complete guarantees all three are set
                ExamPoint::new(
                    date,
                    update.urea.unwrap_or_default(),
                    update.creatinine.unwrap_or_default(),
                    update.leukocytes.unwrap_or_default(),
                )
            }
        };

        let mut points = self.points.clone();
        points.push(point);
        Ok(ExamSeries { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ExamSeries {
        ExamSeries::from_points(vec![ExamPoint::new("2025-08-12", 60.0, 1.6, 13800.0)])
    }

    #[test]
    fn test_carry_forward_unset_fields() {
        let series = seeded();
        let update = EventAnalysis {
            leukocytes: Some(12000.0),
            ..Default::default()
        };

        let merged = series.merged("2025-08-14", &update).unwrap();

        assert_eq!(merged.len(), 2);
        let last = merged.last().unwrap();
        assert_eq!(last.date, "2025-08-14");
        assert_eq!(last.urea, 60.0);
        assert_eq!(last.creatinine, 1.6);
        assert_eq!(last.leukocytes, 12000.0);
    }

    #[test]
    fn test_supplied_fields_override_previous() {
        let series = seeded();
        let update = EventAnalysis {
            urea: Some(55.0),
            creatinine: Some(1.4),
            leukocytes: Some(9000.0),
            notes: None,
        };

        let merged = series.merged("2025-08-15", &update).unwrap();
        let last = merged.last().unwrap();
        assert_eq!(last.urea, 55.0);
        assert_eq!(last.creatinine, 1.4);
        assert_eq!(last.leukocytes, 9000.0);
    }

    #[test]
    fn test_original_series_untouched() {
        let series = seeded();
        let update = EventAnalysis {
            urea: Some(70.0),
            ..Default::default()
        };

        let merged = series.merged("2025-08-14", &update).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(series.last().unwrap().urea, 60.0);
    }

    #[test]
    fn test_dates_need_not_be_monotonic() {
        let series = seeded();
        let update = EventAnalysis {
            leukocytes: Some(14000.0),
            ..Default::default()
        };

        // Back-dated event still appends at the end
        let merged = series.merged("2025-08-01", &update).unwrap();
        assert_eq!(merged.last().unwrap().date, "2025-08-01");
        assert_eq!(merged.points()[0].date, "2025-08-12");
    }

    #[test]
    fn test_empty_update_rejected() {
        let series = seeded();
        let update = EventAnalysis {
            notes: Some("sem valores".into()),
            ..Default::default()
        };

        assert_eq!(
            series.merged("2025-08-14", &update),
            Err(MergeError::EmptyUpdate)
        );
    }

    #[test]
    fn test_bootstrap_requires_complete_update() {
        let empty = ExamSeries::new();
        let partial = EventAnalysis {
            leukocytes: Some(12000.0),
            ..Default::default()
        };

        assert_eq!(
            empty.merged("2025-08-14", &partial),
            Err(MergeError::IncompleteBootstrap)
        );

        let complete = EventAnalysis {
            urea: Some(60.0),
            creatinine: Some(1.6),
            leukocytes: Some(13800.0),
            notes: None,
        };
        let merged = empty.merged("2025-08-14", &complete).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.last().unwrap().leukocytes, 13800.0);
    }
}

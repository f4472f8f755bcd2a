//! Property tests for the exam series and the scanner.

use proptest::prelude::*;

use clinical_timeline_core::resolver::scan_text;
use clinical_timeline_core::{EventAnalysis, ExamPoint, ExamSeries};

/// A partial update with at least one field set.
fn partial_update() -> impl Strategy<Value = EventAnalysis> {
    (
        proptest::option::of(1.0_f64..500.0),
        proptest::option::of(0.1_f64..20.0),
        proptest::option::of(1000.0_f64..50000.0),
    )
        .prop_filter("at least one value", |(u, c, l)| {
            u.is_some() || c.is_some() || l.is_some()
        })
        .prop_map(|(urea, creatinine, leukocytes)| EventAnalysis {
            urea,
            creatinine,
            leukocytes,
            notes: None,
        })
}

proptest! {
    /// Every merged point takes the update's value where set and the
    /// previous point's value everywhere else.
    #[test]
    fn carry_forward_matches_model(updates in prop::collection::vec(partial_update(), 1..20)) {
        let mut series =
            ExamSeries::from_points(vec![ExamPoint::new("2025-01-01", 50.0, 1.0, 10000.0)]);
        let mut expected = (50.0, 1.0, 10000.0);

        for (i, update) in updates.iter().enumerate() {
            let date = format!("2025-01-{:02}", (i % 28) + 1);
            series = series.merged(&date, update).unwrap();

            expected = (
                update.urea.unwrap_or(expected.0),
                update.creatinine.unwrap_or(expected.1),
                update.leukocytes.unwrap_or(expected.2),
            );

            let last = series.last().unwrap();
            prop_assert_eq!(last.urea, expected.0);
            prop_assert_eq!(last.creatinine, expected.1);
            prop_assert_eq!(last.leukocytes, expected.2);
            prop_assert_eq!(last.date.as_str(), date.as_str());
        }

        prop_assert_eq!(series.len(), updates.len() + 1);
    }

    /// Merging never shrinks or reorders the existing points.
    #[test]
    fn merge_preserves_prefix(updates in prop::collection::vec(partial_update(), 1..10)) {
        let mut series =
            ExamSeries::from_points(vec![ExamPoint::new("2025-01-01", 50.0, 1.0, 10000.0)]);

        for update in &updates {
            let next = series.merged("2025-02-01", update).unwrap();
            prop_assert_eq!(&next.points()[..series.len()], series.points());
            series = next;
        }
    }

    /// The scanner is total: any input yields a clean hit or a clean miss.
    #[test]
    fn scanner_never_panics(text in ".*") {
        if let Some(analysis) = scan_text(&text) {
            prop_assert!(analysis.has_values());
        }
    }

    /// Whitespace-only text never yields an analysis.
    #[test]
    fn whitespace_always_misses(text in "[ \t\n\r]*") {
        prop_assert!(scan_text(&text).is_none());
    }
}

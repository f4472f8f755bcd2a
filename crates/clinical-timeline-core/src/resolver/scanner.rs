//! Labeled lab-value scanner.
//!
//! Pulls urea, creatinine and leukocyte readings out of free text. The text
//! is case/diacritic-folded, then each biomarker label is located and the
//! first decimal number after it is taken. `,` and `.` are both accepted as
//! the decimal separator.

use crate::models::{Biomarker, EventAnalysis, NOTE_READ_FROM_DETAILS};

/// Outcome of scanning one biomarker field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldScan {
    /// Label found with a trailing number.
    Matched(f64),
    /// Label absent, or present with no trailing number.
    NotFound,
}

/// Scan free text for labeled lab values.
///
/// Empty or whitespace-only text returns `None` without scanning. Returns
/// `Some` when at least one biomarker matched, with the text-extraction
/// provenance note attached; `None` otherwise, signalling the caller to try
/// the fallback path.
pub fn scan_text(details: &str) -> Option<EventAnalysis> {
    if details.trim().is_empty() {
        return None;
    }

    let folded = fold(details);
    let mut analysis = EventAnalysis::default();
    let mut matched = false;

    for biomarker in Biomarker::ALL {
        if let FieldScan::Matched(value) = scan_field(&folded, biomarker) {
            biomarker.set(&mut analysis, value);
            matched = true;
        }
    }

    if !matched {
        return None;
    }
    analysis.notes = Some(NOTE_READ_FROM_DETAILS.into());
    Some(analysis)
}

/// Scan folded text for one biomarker's label and its trailing number.
///
/// With several accepted spellings, the earliest occurrence wins.
pub fn scan_field(folded: &str, biomarker: Biomarker) -> FieldScan {
    let hit = biomarker
        .labels()
        .iter()
        .filter_map(|label| folded.find(label).map(|pos| (pos, pos + label.len())))
        .min_by_key(|(pos, _)| *pos);

    match hit {
        Some((_, after)) => match number_after(folded, after) {
            Some(value) => FieldScan::Matched(value),
            None => FieldScan::NotFound,
        },
        None => FieldScan::NotFound,
    }
}

/// Lowercase and strip diacritical marks.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).map(strip_mark).collect()
}

/// Map an accented Latin letter to its base letter.
fn strip_mark(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Parse the first decimal number at or after byte position `start`.
///
/// Grammar: digit run, optionally one `.`/`,` followed by another digit run.
/// The separator is always a decimal mark, never a thousands mark.
fn number_after(text: &str, start: usize) -> Option<f64> {
    let bytes = text.as_bytes();

    let mut begin = start;
    while begin < bytes.len() && !bytes[begin].is_ascii_digit() {
        begin += 1;
    }
    if begin >= bytes.len() {
        return None;
    }

    let mut end = begin;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end + 1 < bytes.len()
        && (bytes[end] == b'.' || bytes[end] == b',')
        && bytes[end + 1].is_ascii_digit()
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    // The matched run is pure ASCII, so slicing is safe.
    text[begin..end].replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_label_with_number() {
        let analysis = scan_text("urea alta: ureia 60, estável").unwrap();
        assert_eq!(analysis.urea, Some(60.0));
        assert_eq!(analysis.creatinine, None);
        assert_eq!(analysis.leukocytes, None);
        assert_eq!(analysis.notes.as_deref(), Some(NOTE_READ_FROM_DETAILS));
    }

    #[test]
    fn test_decimal_separator_comma_and_dot() {
        let a = scan_text("creatinina 1,6").unwrap();
        let b = scan_text("creatinina 1.6").unwrap();
        assert_eq!(a.creatinine, Some(1.6));
        assert_eq!(b.creatinine, Some(1.6));
    }

    #[test]
    fn test_latin_short_form_of_urea() {
        let analysis = scan_text("urea 60, estável").unwrap();
        assert_eq!(analysis.urea, Some(60.0));
        assert_eq!(analysis.creatinine, None);
        assert_eq!(analysis.leukocytes, None);
    }

    #[test]
    fn test_old_orthography_ureia() {
        let analysis = scan_text("Uréia: 58").unwrap();
        assert_eq!(analysis.urea, Some(58.0));
    }

    #[test]
    fn test_diacritics_and_case() {
        let accented = scan_text("Leucócitos: 9000").unwrap();
        let plain = scan_text("leucocitos 9000").unwrap();
        assert_eq!(accented.leukocytes, Some(9000.0));
        assert_eq!(plain.leukocytes, Some(9000.0));
    }

    #[test]
    fn test_singular_label() {
        let analysis = scan_text("contagem de leucócito 8500").unwrap();
        assert_eq!(analysis.leukocytes, Some(8500.0));
    }

    #[test]
    fn test_all_three_fields() {
        let analysis = scan_text("Ureia 60, creatinina 1,6 e leucócitos 13800").unwrap();
        assert_eq!(analysis.urea, Some(60.0));
        assert_eq!(analysis.creatinine, Some(1.6));
        assert_eq!(analysis.leukocytes, Some(13800.0));
    }

    #[test]
    fn test_empty_and_whitespace_yield_none() {
        assert_eq!(scan_text(""), None);
        assert_eq!(scan_text("   \n\t  "), None);
    }

    #[test]
    fn test_no_labels_yields_none() {
        assert_eq!(scan_text("Paciente estável, sem queixas."), None);
    }

    #[test]
    fn test_label_without_number_is_not_found() {
        assert_eq!(scan_text("ureia pendente de resultado"), None);

        // One labeled number is enough even when another label has none
        let analysis = scan_text("ureia pendente, creatinina 1,4").unwrap();
        assert_eq!(analysis.urea, None);
        assert_eq!(analysis.creatinine, Some(1.4));
    }

    #[test]
    fn test_number_is_nearest_after_label() {
        let analysis = scan_text("dia 12: ureia subiu para 70").unwrap();
        assert_eq!(analysis.urea, Some(70.0));
    }

    #[test]
    fn test_scan_field_tagged_results() {
        assert_eq!(
            scan_field("ureia 60", Biomarker::Urea),
            FieldScan::Matched(60.0)
        );
        assert_eq!(scan_field("ureia 60", Biomarker::Creatinine), FieldScan::NotFound);
        assert_eq!(scan_field("ureia alta", Biomarker::Urea), FieldScan::NotFound);
    }

    #[test]
    fn test_number_after_grammar() {
        assert_eq!(number_after("abc 12", 0), Some(12.0));
        assert_eq!(number_after("x 1,6 y", 0), Some(1.6));
        assert_eq!(number_after("x 1.6 y", 0), Some(1.6));
        // Separator with no trailing digit ends the number
        assert_eq!(number_after("valor 12, depois", 0), Some(12.0));
        assert_eq!(number_after("sem numero", 0), None);
        // Only the first decimal mark belongs to the number
        assert_eq!(number_after("13.800,5", 0), Some(13.8));
    }
}

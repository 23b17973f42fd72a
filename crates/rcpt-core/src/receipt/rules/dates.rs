//! Receipt date extraction.
//!
//! Dates are matched by shape alone (`MM/DD/YYYY`) and kept verbatim; no
//! calendar validation happens here. See
//! [`ExtractionResult::parsed_date`](crate::ExtractionResult::parsed_date)
//! for an interpreted view.

use super::patterns::RECEIPT_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        RECEIPT_DATE.find(text).map(to_match)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        RECEIPT_DATE.find_iter(text).map(to_match).collect()
    }
}

fn to_match(m: regex::Match<'_>) -> ExtractionMatch<String> {
    ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end())
}

/// Extract the first `MM/DD/YYYY`-shaped substring.
pub fn extract_receipt_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_date_wins() {
        let text = "Visit 03/14/2024 12:01\nReturn by 04/13/2024";
        assert_eq!(extract_receipt_date(text), Some("03/14/2024".to_string()));
        assert_eq!(DateExtractor::new().extract_all(text).len(), 2);
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(
            extract_receipt_date("DATE 13/45/2099"),
            Some("13/45/2099".to_string())
        );
    }

    #[test]
    fn test_other_shapes_do_not_match() {
        assert_eq!(extract_receipt_date("3/14/2024"), None);
        assert_eq!(extract_receipt_date("03-14-2024"), None);
        assert_eq!(extract_receipt_date("03/14/24"), None);
        assert_eq!(extract_receipt_date("2024/03/14"), None);
    }

    #[test]
    fn test_position() {
        let m = DateExtractor::new().extract("on 01/02/2023").unwrap();
        assert_eq!(m.position, Some((3, 13)));
    }
}

//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod store;

pub use amounts::{extract_total, format_amount, parse_amount, DollarAmountExtractor};
pub use category::{classify, matching_rule, CATEGORY_RULES};
pub use dates::{extract_receipt_date, DateExtractor};
pub use items::{classify_line, extract_line_items, scan_line_items, ItemScan, LineKind};
pub use store::extract_store_name;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in scan order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Shift the position by `by` bytes, for matches found in a sub-slice.
    pub fn offset(mut self, by: usize) -> Self {
        self.position = self.position.map(|(start, end)| (start + by, end + by));
        self
    }
}

/// Split text into lines on `'\n'`, pairing each with its byte offset.
pub(crate) fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}

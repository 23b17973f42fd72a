//! Receipt text interpretation.

mod interpreter;
pub mod rules;

pub use interpreter::{interpret, RuleInterpreter};

use crate::models::receipt::ExtractionResult;
use crate::ocr::OcrResult;

/// Trait for receipt interpreters.
///
/// Interpretation never fails: fields that cannot be found are absent on the
/// returned [`ExtractionResult`].
pub trait ReceiptExtractor {
    /// Interpret the text of an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> ExtractionResult {
        self.extract_from_text(&ocr_result.text)
    }

    /// Interpret plain receipt text.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;
}

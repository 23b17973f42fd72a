//! Rule-based receipt interpreter.

use std::time::Instant;

use tracing::debug;

use crate::models::receipt::ExtractionResult;

use super::rules::{
    amounts::extract_total,
    category::matching_rule,
    dates::extract_receipt_date,
    items::scan_line_items,
    store::extract_store_name,
};
use super::ReceiptExtractor;

/// Interpreter applying the fixed receipt rules.
///
/// Holds no state; one instance may serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleInterpreter;

impl RuleInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Interpret receipt text into structured fields.
    pub fn interpret(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let total = extract_total(text);
        let store_name = extract_store_name(text);
        let receipt_date = extract_receipt_date(text);
        let (category, keyword) = match matching_rule(text) {
            Some((category, keyword)) => (category, Some(keyword)),
            None => (Default::default(), None),
        };
        let scan = scan_line_items(text);

        debug!(
            chars = text.len(),
            items = scan.items.len(),
            stopped_at = ?scan.stopped_at,
            total = ?total.as_ref().map(|m| &m.source),
            %category,
            keyword = ?keyword,
            elapsed_us = start.elapsed().as_micros() as u64,
            "interpreted receipt {:?}",
            store_name
        );

        ExtractionResult {
            raw_text: text.to_string(),
            total_amount: total.map(|m| m.value),
            store_name,
            receipt_date,
            category,
            items: scan.items,
        }
    }
}

impl ReceiptExtractor for RuleInterpreter {
    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.interpret(text)
    }
}

/// Interpret receipt text with the default rules.
pub fn interpret(text: &str) -> ExtractionResult {
    RuleInterpreter::new().interpret(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::{Category, LineItem};
    use crate::ocr::OcrResult;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_interpret_grocery_receipt() {
        let text = "WALMART SUPERCENTER\n\
                    04/02/2024 14:22\n\
                    GV MILK $3.48\n\
                    BANANAS 1.12\n\
                    SUBTOTAL $4.60\n\
                    TOTAL $4.88\n\
                    CASH TEND $5.00\n\
                    CHANGE DUE $0.12";

        let result = interpret(text);

        assert_eq!(result.store_name, "WALMART SUPERCENTER");
        assert_eq!(result.receipt_date.as_deref(), Some("04/02/2024"));
        assert_eq!(result.category, Category::Groceries);
        assert_eq!(result.total_amount, Some(dec("4.88")));
        assert_eq!(
            result.items,
            vec![
                LineItem::new("GV MILK", dec("3.48")),
                LineItem::new("BANANAS", dec("1.12")),
            ]
        );
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_interpret_empty_text() {
        let result = interpret("");

        assert_eq!(result.store_name, "Unknown");
        assert_eq!(result.total_amount, None);
        assert_eq!(result.receipt_date, None);
        assert_eq!(result.category, Category::Other);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_extract_uses_ocr_text() {
        let ocr = OcrResult::from_text("Joe's Pizza\nSlice $3.50");
        let result = RuleInterpreter::new().extract(&ocr);

        assert_eq!(result.category, Category::Meals);
        assert_eq!(result.items, vec![LineItem::new("Slice", dec("3.50"))]);
    }
}

//! Payloads handed to the upload/ingestion layer.
//!
//! An interpretation is either shown to the user as-is ([`UploadResponse`])
//! or turned into a record the caller persists ([`ReceiptSubmission`]).
//! Neither type touches storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::receipt::{Category, ExtractionResult, LineItem};

/// Message attached to a successful upload response.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "OCR extraction successful";

/// Display-only view of an interpreted receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub store_name: String,
    pub category: Category,
    #[serde(default, with = "crate::models::amount::option")]
    pub total_amount: Option<Decimal>,
    pub items: Vec<LineItem>,
}

impl From<&ExtractionResult> for UploadResponse {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            store_name: result.store_name.clone(),
            category: result.category,
            total_amount: result.total_amount,
            items: result.items.clone(),
        }
    }
}

/// A receipt ready to be persisted together with its line items.
///
/// Zero-valued items are dropped and the total is recomputed from what
/// remains, so promotion adjustments reduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSubmission {
    pub store: String,
    pub category: Category,
    pub items: Vec<LineItem>,
    #[serde(with = "crate::models::amount")]
    pub total: Decimal,
}

impl ReceiptSubmission {
    /// Build a submission from user-confirmed parts.
    pub fn new(
        store: impl Into<String>,
        category: Category,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Self {
        let items: Vec<LineItem> = items
            .into_iter()
            .filter(|item| !item.amount.is_zero())
            .collect();
        let total = items.iter().map(|item| item.amount).sum();

        Self {
            store: store.into(),
            category,
            items,
            total,
        }
    }

    /// Build a submission straight from an interpretation.
    pub fn from_extraction(result: &ExtractionResult) -> Self {
        Self::new(
            result.store_name.clone(),
            result.category,
            result.items.iter().cloned(),
        )
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn extraction() -> ExtractionResult {
        ExtractionResult {
            raw_text: String::new(),
            total_amount: Some(dec("10.99")),
            store_name: "Costco Wholesale".to_string(),
            receipt_date: None,
            category: Category::Groceries,
            items: vec![
                LineItem::new("Paper Towels", dec("12.99")),
                LineItem::new("Promotion for Paper Towels", dec("-2.00")),
            ],
        }
    }

    #[test]
    fn test_upload_response_mirrors_extraction() {
        let response = UploadResponse::from(&extraction());

        assert_eq!(response.message, UPLOAD_SUCCESS_MESSAGE);
        assert_eq!(response.store_name, "Costco Wholesale");
        assert_eq!(response.total_amount, Some(dec("10.99")));
        assert_eq!(response.items.len(), 2);
    }

    #[test]
    fn test_submission_sums_items() {
        let submission = ReceiptSubmission::from_extraction(&extraction());

        assert_eq!(submission.store, "Costco Wholesale");
        assert_eq!(submission.total, dec("10.99"));
        assert_eq!(submission.item_count(), 2);
    }

    #[test]
    fn test_submission_drops_zero_items() {
        let submission = ReceiptSubmission::new(
            "Corner Cafe",
            Category::Meals,
            vec![
                LineItem::new("Coffee", dec("3.50")),
                LineItem::new("Free refill", dec("0.00")),
                LineItem::new("Bagel", dec("2.25")),
            ],
        );

        assert_eq!(
            submission.items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["Coffee", "Bagel"]
        );
        assert_eq!(submission.total, dec("5.75"));
    }

    #[test]
    fn test_empty_submission_has_zero_total() {
        let submission = ReceiptSubmission::new("Unknown", Category::Other, Vec::new());
        assert_eq!(submission.total, Decimal::ZERO);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["total"], "0.00");
    }
}

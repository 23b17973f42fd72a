//! Line item scanning.
//!
//! Lines are read top to bottom. The itemized section ends at the first
//! line mentioning a summary or payment keyword; everything below it is
//! metadata. A promotion line discounts the item read just before it.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{trace, warn};

use crate::models::receipt::LineItem;

use super::patterns::{ITEM_LINE, PROMOTION_AMOUNT};

/// Keywords that end the itemized section.
pub const STOP_KEYWORDS: &[&str] = &[
    "order total",
    "sales tax",
    "grand total",
    "change",
    "amount",
    "balance",
    "payment",
    "cash",
    "subtotal",
    "savings summary",
    "special price savings",
];

/// Keyword marking a promotion adjustment line.
pub const PROMOTION_KEYWORD: &str = "promotion";

/// What a single receipt line means to the item scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// End of the itemized section.
    Stop,
    /// A promotion line, with its discount if one could be read.
    Promotion(Option<Decimal>),
    /// A purchased item.
    Item { name: String, amount: Decimal },
    /// Anything else.
    Other,
}

/// Classify one line. Stop keywords are checked first, then the promotion
/// keyword, then the item shape.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    let lower = line.to_lowercase();

    if STOP_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return LineKind::Stop;
    }

    if lower.contains(PROMOTION_KEYWORD) {
        let discount = PROMOTION_AMOUNT.captures(&lower).and_then(|caps| {
            Decimal::from_str(&caps[1])
                .map_err(|e| trace!("unusable promotion amount in {:?}: {}", line, e))
                .ok()
        });
        return LineKind::Promotion(discount);
    }

    let Some(caps) = ITEM_LINE.captures(line) else {
        return LineKind::Other;
    };

    match Decimal::from_str(&caps[2]) {
        Ok(amount) => LineKind::Item {
            name: caps[1].trim().to_string(),
            amount,
        },
        Err(e) => {
            warn!("Skipping item line {:?}: amount unusable: {}", line, e);
            LineKind::Other
        }
    }
}

/// Outcome of scanning a receipt for items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemScan {
    /// Items in receipt order.
    pub items: Vec<LineItem>,
    /// Zero-based index of the line that ended the scan, if one did.
    pub stopped_at: Option<usize>,
}

/// Scan all lines for items and promotion adjustments.
pub fn scan_line_items(text: &str) -> ItemScan {
    let mut scan = ItemScan::default();
    let mut last_item_name: Option<String> = None;

    for (index, line) in text.split('\n').enumerate() {
        match classify_line(line) {
            LineKind::Stop => {
                trace!("item scan stopped at line {}: {:?}", index, line.trim());
                scan.stopped_at = Some(index);
                break;
            }
            LineKind::Promotion(Some(discount)) => {
                if let Some(name) = &last_item_name {
                    scan.items
                        .push(LineItem::new(format!("Promotion for {}", name), -discount.abs()));
                }
            }
            LineKind::Promotion(None) | LineKind::Other => {}
            LineKind::Item { name, amount } => {
                last_item_name = Some(name.clone());
                scan.items.push(LineItem::new(name, amount));
            }
        }
    }

    scan
}

/// Scan for items, discarding where the scan stopped.
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    scan_line_items(text).items
}

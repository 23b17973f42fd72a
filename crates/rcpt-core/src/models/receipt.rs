//! Receipt data models produced by the interpreter.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder store name used when the receipt text is empty.
pub const UNKNOWN_STORE: &str = "Unknown";

/// Structured data interpreted from one receipt's OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The text the result was interpreted from, unchanged.
    pub raw_text: String,

    /// First dollar-formatted amount, preferring lines labelled as a total.
    #[serde(default, with = "crate::models::amount::option")]
    pub total_amount: Option<Decimal>,

    /// Trimmed first line of the text.
    pub store_name: String,

    /// First `MM/DD/YYYY` substring, verbatim.
    #[serde(default)]
    pub receipt_date: Option<String>,

    /// Expense category.
    pub category: Category,

    /// Purchased items and promotion adjustments, in receipt order.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl ExtractionResult {
    /// Interpret `receipt_date` as a calendar date.
    ///
    /// Returns `None` when no date was found or the digits do not form a
    /// real month/day/year. `receipt_date` itself is never altered.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.receipt_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%m/%d/%Y").ok())
    }

    /// Sum of all item amounts, promotions included.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Promotion adjustments only.
    pub fn adjustments(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.is_adjustment())
    }
}

/// A purchased item or a promotion adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description as printed, or `Promotion for <item>`.
    pub name: String,

    /// Price; negative for promotion adjustments.
    #[serde(with = "crate::models::amount")]
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Whether this line is a discount rather than a purchase.
    pub fn is_adjustment(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Expense category of a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Flight,
    Transportation,
    #[serde(rename = "Materials/Tools")]
    MaterialsTools,
    Lodging,
    Meals,
    #[default]
    Other,
}

impl Category {
    /// Every category, in classification order.
    pub const ALL: [Category; 7] = [
        Category::Groceries,
        Category::Flight,
        Category::Transportation,
        Category::MaterialsTools,
        Category::Lodging,
        Category::Meals,
        Category::Other,
    ];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Flight => "Flight",
            Category::Transportation => "Transportation",
            Category::MaterialsTools => "Materials/Tools",
            Category::Lodging => "Lodging",
            Category::Meals => "Meals",
            Category::Other => "Other",
        }
    }

    /// Parse a display label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

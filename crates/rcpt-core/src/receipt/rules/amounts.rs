//! Dollar amount extraction and the two-decimal amount format.

use regex::Captures;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use super::patterns::{AMOUNT_TOKEN, DOLLAR_AMOUNT};
use super::{line_spans, ExtractionMatch, FieldExtractor};

/// Total labels in priority order, each with the labels that disqualify a
/// line carrying it.
pub const TOTAL_LABELS: &[(&str, &[&str])] = &[
    ("grand total", &[]),
    ("order total", &[]),
    ("total", &["subtotal", "sub total", "sub-total", "savings"]),
];

/// Extractor for `$D.DD` tokens.
pub struct DollarAmountExtractor;

impl DollarAmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// A token too large for `Decimal` yields no value.
    fn to_match(caps: &Captures<'_>) -> Option<ExtractionMatch<Decimal>> {
        let full_match = caps.get(0)?;
        match Decimal::from_str(&caps[1]) {
            Ok(amount) => Some(
                ExtractionMatch::new(amount, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            ),
            Err(e) => {
                warn!("Unusable dollar amount {:?}: {}", full_match.as_str(), e);
                None
            }
        }
    }
}

impl Default for DollarAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DollarAmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// Only the first token counts; if its value is unusable there is no
    /// result, even when later tokens parse.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        DOLLAR_AMOUNT
            .captures(text)
            .and_then(|caps| Self::to_match(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DOLLAR_AMOUNT
            .captures_iter(text)
            .filter_map(|caps| Self::to_match(&caps))
            .collect()
    }
}

/// Find the receipt total.
///
/// The first dollar amount on the highest-priority labelled line wins (see
/// [`TOTAL_LABELS`]). Without any labelled line, the first dollar amount in
/// the text is used.
pub fn extract_total(text: &str) -> Option<ExtractionMatch<Decimal>> {
    let extractor = DollarAmountExtractor::new();

    for (label, excluded) in TOTAL_LABELS {
        let labelled = line_spans(text)
            .filter(|(_, line)| {
                let lower = line.to_lowercase();
                lower.contains(label) && !excluded.iter().any(|e| lower.contains(e))
            })
            .find_map(|(start, line)| extractor.extract(line).map(|m| m.offset(start)));

        if labelled.is_some() {
            return labelled;
        }
    }

    extractor.extract(text)
}

/// Parse an amount such as `"12.99"`, `"$12.99"` or `"-$2.00"`.
///
/// Exactly two fractional digits are required; thousands separators are not
/// accepted.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let caps = AMOUNT_TOKEN.captures(s.trim())?;
    let amount = Decimal::from_str(&caps[2]).ok()?;

    if caps.get(1).is_some() {
        Some(-amount)
    } else {
        Some(amount)
    }
}

/// Format an amount with exactly two fractional digits and no currency sign.
pub fn format_amount(amount: Decimal) -> String {
    if amount.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", amount)
}

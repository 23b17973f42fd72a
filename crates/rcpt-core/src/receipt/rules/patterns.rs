//! Common regex patterns for receipt text.
//!
//! Digits are matched as `[0-9]` so every capture parses as a `Decimal`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "$12.99" or "$ 12.99"; at most one whitespace after the sign
    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"\$\s?([0-9]+\.[0-9]{2})"
    ).unwrap();

    // MM/DD/YYYY, shape only
    pub static ref RECEIPT_DATE: Regex = Regex::new(
        r"([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    // Applied to the lower-cased line
    pub static ref PROMOTION_AMOUNT: Regex = Regex::new(
        r"promotion\s+-?\$?\s*([0-9]+\.[0-9]{2})"
    ).unwrap();

    // "<description> [$]12.99" ending the line
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^(.+?)\s+\$?\s*([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // A standalone amount: optional minus, optional dollar sign
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"^(-)?\s*\$?\s*([0-9]+\.[0-9]{2})$"
    ).unwrap();
}

//! Store name extraction.

use crate::models::receipt::UNKNOWN_STORE;

/// The merchant name is taken to be the first line, trimmed.
///
/// Empty text yields [`UNKNOWN_STORE`]. Whitespace-only first lines yield an
/// empty name.
pub fn extract_store_name(text: &str) -> String {
    if text.is_empty() {
        return UNKNOWN_STORE.to_string();
    }

    text.split('\n')
        .next()
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_STORE.to_string())
}

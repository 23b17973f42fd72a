//! Serde adapters for monetary amounts.
//!
//! Amounts travel as base-10 strings with exactly two fractional digits and
//! no currency symbol, e.g. `"12.99"` or `"-2.00"`. Use with
//! `#[serde(with = "crate::models::amount")]`, or `amount::option` for
//! optional fields.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::receipt::rules::amounts::{format_amount, parse_amount};

pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_amount(*value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_amount(&raw).ok_or_else(|| D::Error::custom(format!("invalid amount: {raw}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(amount) => serializer.serialize_some(&format_amount(*amount)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                parse_amount(&raw).ok_or_else(|| D::Error::custom(format!("invalid amount: {raw}")))
            })
            .transpose()
    }
}

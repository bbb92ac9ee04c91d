//! Pump.fun response normalization.

use serde_json::Value;

use crate::domain::{CoinRecord, TradeRecord};

/// Turn a coin listing body into records.
///
/// Accepts a bare list, `{"data": [...]}` or `{"coins": [...]}`, checked in
/// that order. Any other shape is an empty listing. Entries that are not coin
/// objects are dropped.
#[must_use]
pub fn normalize_coin_list(body: Value) -> Vec<CoinRecord> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("coins")) {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<CoinRecord>(entry) {
            Ok(coin) => Some(coin),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed coin entry");
                None
            }
        })
        .collect()
}

/// Turn a trades body into records. Only a bare list is accepted.
#[must_use]
pub fn normalize_trades(body: Value) -> Vec<TradeRecord> {
    match body {
        Value::Array(entries) => entries.into_iter().map(TradeRecord).collect(),
        _ => Vec::new(),
    }
}

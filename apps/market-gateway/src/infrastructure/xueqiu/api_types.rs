//! Xueqiu API response types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::{COOKIE_INVALID_CODE, XueqiuError};
use crate::domain::CandleRecord;
use crate::domain::numeric::{lenient_f64, value_to_f64, value_to_i64};

/// `GET /v5/stock/quote.json` response.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub data: Option<QuoteData>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub quote: Option<QuoteBody>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current: Option<f64>,
}

impl QuoteResponse {
    /// Current price when present and positive.
    pub fn positive_current(&self) -> Option<f64> {
        self.data
            .as_ref()
            .and_then(|d| d.quote.as_ref())
            .and_then(|q| q.current)
            .filter(|price| *price > 0.0)
    }
}

/// `GET /v5/stock/chart/kline.json` response, also used for error bodies.
#[derive(Debug, Default, Deserialize)]
pub struct KlineResponse {
    #[serde(default)]
    pub data: Option<KlineData>,
    #[serde(default)]
    pub error_code: Option<Value>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

/// Column names plus parallel rows.
///
/// Both levels are kept as raw values. Non-string column names and
/// non-array rows are skipped on projection.
#[derive(Debug, Default, Deserialize)]
pub struct KlineData {
    #[serde(default, deserialize_with = "array_or_empty")]
    pub column: Vec<Value>,
    #[serde(default, deserialize_with = "array_or_empty")]
    pub item: Vec<Value>,
}

fn array_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values,
        _ => Vec::new(),
    })
}

impl KlineResponse {
    /// Upstream error code as text (`0`, `"400016"`, ...).
    pub fn code(&self) -> Option<String> {
        match self.error_code.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Check if the body carries the cookie-invalid code.
    pub fn is_cookie_rejection(&self) -> bool {
        self.code().as_deref() == Some(COOKIE_INVALID_CODE)
    }

    /// Rows when the response is a success with at least one item.
    pub fn into_rows(self) -> Result<KlineData, XueqiuError> {
        let code = self.code();
        if code.as_deref() == Some(COOKIE_INVALID_CODE) {
            return Err(XueqiuError::CookieRejected);
        }

        if code.as_deref() == Some("0") || self.data.is_some() {
            return match self.data {
                Some(data) if data.has_rows() => Ok(data),
                _ => Err(XueqiuError::Empty),
            };
        }

        Err(XueqiuError::Api {
            code: code.unwrap_or_else(|| "unknown".to_string()),
            description: self
                .error_description
                .or(self.error_msg)
                .unwrap_or_default(),
        })
    }
}

impl KlineData {
    /// Column position by name. Positions count skipped entries too.
    fn column_index(&self) -> HashMap<&str, usize> {
        self.column
            .iter()
            .enumerate()
            .filter_map(|(i, name)| name.as_str().map(|name| (name, i)))
            .collect()
    }

    fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.item.iter().filter_map(|row| row.as_array().map(Vec::as_slice))
    }

    fn has_rows(&self) -> bool {
        self.column.iter().any(Value::is_string) && self.rows().next().is_some()
    }

    /// Project every row into a candle, in upstream order.
    pub fn candles(&self) -> Vec<CandleRecord> {
        let index = self.column_index();
        self.rows().map(|row| project_row(&index, row)).collect()
    }

    /// Close of the first row.
    pub fn latest_close(&self) -> Option<f64> {
        let index = self.column_index();
        let row = self.rows().next()?;
        cell(&index, row, "close").and_then(value_to_f64)
    }
}

fn cell<'a>(index: &HashMap<&str, usize>, row: &'a [Value], name: &str) -> Option<&'a Value> {
    index.get(name).and_then(|&i| row.get(i))
}

fn project_row(index: &HashMap<&str, usize>, row: &[Value]) -> CandleRecord {
    let number = |name: &str| cell(index, row, name).and_then(value_to_f64);
    let timestamp = cell(index, row, "timestamp").and_then(value_to_i64);

    CandleRecord {
        timestamp,
        datetime: timestamp.and_then(DateTime::<Utc>::from_timestamp_millis),
        open: number("open"),
        high: number("high"),
        low: number("low"),
        close: number("close"),
        volume: number("volume"),
        amount: number("amount"),
        change: number("chg"),
        change_percent: number("percent"),
    }
}

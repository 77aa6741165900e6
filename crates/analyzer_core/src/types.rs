//! Market data model: events, price snapshots, economic indicators.

use analyzer_constant::limits::NOT_AVAILABLE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A dated market headline or note supplied by the caller. Either field may
/// arrive as null or a non-string scalar; both are rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
}

impl MarketEvent {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }
}

/// OHLCV reading for one asset. Every field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default, deserialize_with = "lenient_number")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub volume: Option<f64>,
}

impl PriceSnapshot {
    pub fn new(open: Option<f64>, close: Option<f64>) -> Self {
        Self {
            open,
            close,
            ..Default::default()
        }
    }

    /// Percentage move from open to close.
    ///
    /// `None` when either endpoint is missing or zero, or the result is not
    /// finite. A zero open never yields infinity or NaN.
    pub fn change(&self) -> Option<f64> {
        let open = present(self.open)?;
        let close = present(self.close)?;
        let pct = (close - open) / open * 100.0;
        pct.is_finite().then_some(pct)
    }

    /// `change()` as `"12.34%"`, or the `N/A` sentinel.
    pub fn change_display(&self) -> String {
        self.change()
            .map(|pct| format!("{pct:.2}%"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Tracked assets for the report variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    #[serde(default)]
    pub btc: PriceSnapshot,
    #[serde(default)]
    pub eth: PriceSnapshot,
}

/// A macro reading as the caller wrote it. Strings are kept verbatim so a
/// sign or unit survives into the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    /// Prompt rendering: numbers follow [`display_number`], blank text is `N/A`.
    pub fn display(reading: Option<&Reading>) -> String {
        match reading {
            Some(Reading::Number(n)) => display_number(Some(*n)),
            Some(Reading::Text(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A single macro reading and its latest change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicIndicator {
    #[serde(
        default,
        deserialize_with = "lenient_reading",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Reading>,
    #[serde(
        default,
        deserialize_with = "lenient_reading",
        skip_serializing_if = "Option::is_none"
    )]
    pub change: Option<Reading>,
}

impl EconomicIndicator {
    pub fn new(value: Option<f64>, change: Option<f64>) -> Self {
        Self {
            value: value.map(Reading::Number),
            change: change.map(Reading::Number),
        }
    }
}

/// Macro indicators keyed by name. An indicator that is not a JSON object
/// is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicData {
    #[serde(default, deserialize_with = "lenient_indicator", skip_serializing_if = "Option::is_none")]
    pub unemployment: Option<EconomicIndicator>,
    #[serde(default, deserialize_with = "lenient_indicator", skip_serializing_if = "Option::is_none")]
    pub fed_rate: Option<EconomicIndicator>,
    #[serde(default, deserialize_with = "lenient_indicator", skip_serializing_if = "Option::is_none")]
    pub nfp: Option<EconomicIndicator>,
    #[serde(default, deserialize_with = "lenient_indicator", skip_serializing_if = "Option::is_none")]
    pub cpi: Option<EconomicIndicator>,
}

/// Renders a reading for a prompt. Missing, zero and non-finite values all
/// collapse to `N/A`.
pub fn display_number(value: Option<f64>) -> String {
    present(value)
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

/// Accepts a JSON number, a numeric string, or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    })
}

/// Null becomes empty, other scalars their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_reading<'de, D>(deserializer: D) -> Result<Option<Reading>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().map(Reading::Number),
        Some(Value::String(s)) => Some(Reading::Text(s)),
        _ => None,
    })
}

fn lenient_indicator<'de, D>(deserializer: D) -> Result<Option<EconomicIndicator>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

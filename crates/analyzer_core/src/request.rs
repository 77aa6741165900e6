//! Request bodies accepted by the analysis endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{EconomicData, MarketEvent, PriceData};

/// `POST /analyze` for the report variant. Both fields are required; they are
/// optional here so a missing field becomes a 400, not a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysisRequest {
    #[serde(default)]
    pub events: Option<Vec<MarketEvent>>,
    #[serde(default)]
    pub price_data: Option<PriceData>,
}

impl ReportAnalysisRequest {
    /// Returns the required parts, or `None` when either is absent.
    pub fn required_parts(&self) -> Option<(&[MarketEvent], &PriceData)> {
        match (&self.events, &self.price_data) {
            (Some(events), Some(price_data)) => Some((events.as_slice(), price_data)),
            _ => None,
        }
    }
}

/// `POST /analyze` for the structured variant. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnalysisRequest {
    #[serde(default)]
    pub events: Option<Vec<MarketEvent>>,
    #[serde(default)]
    pub economic_data: Option<EconomicData>,
    /// Opaque file references; only the count is used.
    #[serde(default)]
    pub uploaded_files: Option<Vec<Value>>,
}

impl StructuredAnalysisRequest {
    pub fn events(&self) -> &[MarketEvent] {
        self.events.as_deref().unwrap_or_default()
    }

    pub fn uploaded_file_count(&self) -> usize {
        self.uploaded_files.as_ref().map_or(0, Vec::len)
    }
}

/// `POST /analyze-economic`. The indicators are forwarded to the model as
/// sent, so they stay untyped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicAnalysisRequest {
    #[serde(default)]
    pub economic_data: Option<Value>,
}

impl EconomicAnalysisRequest {
    /// The indicators, or `None` when absent, null, `false`, `0` or `""`.
    pub fn economic_data(&self) -> Option<&Value> {
        self.economic_data.as_ref().filter(|v| match v {
            Value::Null | Value::Bool(false) => false,
            Value::Number(n) => n.as_f64() != Some(0.0),
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }
}

//! Shape check for structured analysis payloads.

use std::str::FromStr;

use serde_json::Value;

/// Top-level sections of the structured analysis schema.
pub const REQUIRED_SECTIONS: &[&str] = &[
    "marketSentiment",
    "predictions",
    "marketMetrics",
    "riskFactors",
    "aiInsights",
    "patternAnalysis",
    "economicImpact",
    "performanceSummary",
];

/// Horizons expected under `predictions`.
pub const PREDICTION_HORIZONS: &[&str] = &["1d", "1w", "1m", "1y"];

/// How a parsed payload is checked against the documented schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Trust the model; return whatever parsed.
    #[default]
    PassThrough,
    /// Log missing sections but keep the payload.
    Warn,
    /// Replace a payload with missing sections by the fallback.
    Strict,
}

impl FromStr for SchemaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "pass" | "passthrough" | "pass-through" | "off" => Ok(SchemaPolicy::PassThrough),
            "warn" => Ok(SchemaPolicy::Warn),
            "strict" => Ok(SchemaPolicy::Strict),
            other => Err(format!("unknown schema policy: {other}")),
        }
    }
}

/// Dotted paths of documented sections absent from `payload`.
pub fn missing_sections(payload: &Value) -> Vec<String> {
    let Some(obj) = payload.as_object() else {
        return REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect();
    };

    let mut missing: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|s| !obj.contains_key(**s))
        .map(|s| s.to_string())
        .collect();

    if let Some(predictions) = obj.get("predictions") {
        missing.extend(
            PREDICTION_HORIZONS
                .iter()
                .filter(|h| predictions.get(**h).is_none())
                .map(|h| format!("predictions.{h}")),
        );
    }

    missing
}

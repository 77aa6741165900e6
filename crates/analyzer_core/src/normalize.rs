//! Model-output normalizer: strip reasoning blocks and code fences, then parse JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::schema::{SchemaPolicy, missing_sections};

/// Error marker carried by the fallback when the cleaned text is not JSON.
pub const PARSE_FAILED: &str = "Parsing failed";
/// Error marker carried by the fallback when strict schema checking rejects a payload.
pub const SCHEMA_FAILED: &str = "Schema validation failed";

static REASONING_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid reasoning regex"));
static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\n?").expect("valid fence regex"));
static BARE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\n?").expect("valid fence regex"));

/// Outcome of normalizing one model reply. Serialized untagged: a parsed
/// payload goes out as-is, a fallback as `{ "error": ..., "raw": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Parsed(Value),
    Fallback { error: String, raw: String },
}

impl AnalysisResult {
    fn fallback(error: &str, raw: &str) -> Self {
        AnalysisResult::Fallback {
            error: error.to_string(),
            raw: raw.to_string(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, AnalysisResult::Parsed(_))
    }
}

/// Removes every `<think>...</think>` span (non-greedy, across lines).
pub fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK.replace_all(text, "").into_owned()
}

/// Removes "```json" opening fences and bare "```" fences, each with one
/// optional trailing newline.
pub fn strip_code_fences(text: &str) -> String {
    let without_open = JSON_FENCE.replace_all(text, "");
    BARE_FENCE.replace_all(&without_open, "").into_owned()
}

/// Reasoning blocks, then fences, then surrounding whitespace.
pub fn clean_model_output(text: &str) -> String {
    strip_code_fences(&strip_reasoning(text)).trim().to_string()
}

/// Parses a model reply with no schema check.
pub fn normalize(raw: &str) -> AnalysisResult {
    normalize_with(raw, SchemaPolicy::PassThrough)
}

/// Parses a model reply, applying `policy` to a successfully parsed payload.
///
/// Never fails: unparseable text becomes [`AnalysisResult::Fallback`] whose
/// `raw` is the original reply, markup included.
pub fn normalize_with(raw: &str, policy: SchemaPolicy) -> AnalysisResult {
    let cleaned = clean_model_output(raw);
    let value = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "JSON parse of model output failed");
            tracing::warn!(raw = %raw, "Raw model output");
            return AnalysisResult::fallback(PARSE_FAILED, raw);
        }
    };

    if policy == SchemaPolicy::PassThrough {
        return AnalysisResult::Parsed(value);
    }

    let missing = missing_sections(&value);
    if missing.is_empty() {
        return AnalysisResult::Parsed(value);
    }
    match policy {
        SchemaPolicy::Strict => {
            tracing::warn!(missing = ?missing, "Model output rejected by schema check");
            AnalysisResult::fallback(SCHEMA_FAILED, raw)
        }
        _ => {
            tracing::warn!(missing = ?missing, "Model output is missing documented sections");
            AnalysisResult::Parsed(value)
        }
    }
}

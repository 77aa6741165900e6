//! Prompt bounds and sampling presets per endpoint.

/// Events included verbatim in a prompt; the rest are summarized as a count.
pub const MAX_PROMPT_EVENTS: usize = 50;

/// Sentinel rendered for any absent value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sampling parameters for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPreset {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// `POST /analyze`, report variant (free-text report)
pub const REPORT_ANALYSIS: SamplingPreset = SamplingPreset {
    max_tokens: 2048,
    temperature: None,
};

/// `POST /analyze`, structured variant (JSON payload)
pub const STRUCTURED_ANALYSIS: SamplingPreset = SamplingPreset {
    max_tokens: 2048,
    temperature: Some(0.7),
};

/// `POST /analyze-economic`
pub const ECONOMIC_ANALYSIS: SamplingPreset = SamplingPreset {
    max_tokens: 512,
    temperature: Some(0.6),
};

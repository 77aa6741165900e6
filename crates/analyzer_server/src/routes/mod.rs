pub mod analyze;
pub mod economic;
pub mod health;

use std::sync::Arc;
use std::time::Instant;

use analyzer_constant::limits::SamplingPreset;
use analyzer_llms::GenerateRequest;
use analyzer_observability::{inference_span, record_duration};
use axum::Router;
use axum::routing::{get, post};
use chrono::{SecondsFormat, Utc};
use tracing::Instrument;

use crate::config::Variant;
use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the API router for a variant.
pub fn api_router(variant: Variant) -> Router<Arc<AppState>> {
    let router = Router::new().route("/health", get(health::health));

    match variant {
        Variant::Report => router.route("/analyze", post(analyze::analyze_report)),
        Variant::Structured => router
            .route("/analyze", post(analyze::analyze_structured))
            .route("/analyze-economic", post(economic::analyze_economic)),
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Send `prompt` as the single user message and return the model's text.
pub(crate) async fn complete(
    state: &AppState,
    prompt: String,
    preset: SamplingPreset,
    purpose: &'static str,
) -> Result<String, ApiError> {
    let model = state.gateway.model().to_string();
    let request = GenerateRequest::user_prompt(model.as_str(), prompt)
        .with_max_tokens(preset.max_tokens)
        .with_temperature(preset.temperature)
        .with_deadline(state.config.timeout);

    let cancel = state.shutdown.child_token();
    let started = Instant::now();
    let result = state
        .gateway
        .generate(request, &cancel)
        .instrument(inference_span!(model.as_str(), purpose))
        .await;
    record_duration("inference.duration_ms", started.elapsed());

    Ok(result?.content)
}

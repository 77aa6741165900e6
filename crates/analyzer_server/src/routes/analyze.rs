use std::sync::Arc;

use analyzer_constant::limits::{REPORT_ANALYSIS, STRUCTURED_ANALYSIS};
use analyzer_core::{
    AnalysisResult, ReportAnalysisRequest, StructuredAnalysisRequest, build_report_prompt,
    build_structured_prompt, normalize_with,
};
use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{complete, timestamp};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Free-text analysis response
#[derive(Debug, Serialize)]
pub struct TextAnalysisResponse {
    pub analysis: String,
}

/// Structured analysis response
#[derive(Debug, Serialize)]
pub struct StructuredAnalysisResponse {
    pub success: bool,
    pub analysis: AnalysisResult,
    pub timestamp: String,
}

/// POST /analyze (report variant): events and price data in, report text out.
pub async fn analyze_report(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<ReportAnalysisRequest>,
) -> Result<Json<TextAnalysisResponse>, ApiError> {
    let Some((events, price_data)) = body.required_parts() else {
        return Err(ApiError::BadRequest("Missing events or priceData".to_string()));
    };

    let prompt = build_report_prompt(events, price_data);
    let analysis = complete(&state, prompt, REPORT_ANALYSIS, "report").await?;

    Ok(Json(TextAnalysisResponse { analysis }))
}

/// POST /analyze (structured variant): model output parsed into JSON, with
/// a fallback payload when parsing fails.
pub async fn analyze_structured(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<StructuredAnalysisRequest>,
) -> Result<Json<StructuredAnalysisResponse>, ApiError> {
    let events = body.events();
    tracing::debug!(
        events = events.len(),
        uploaded_files = body.uploaded_file_count(),
        "Structured analysis requested"
    );

    let prompt = build_structured_prompt(
        events,
        body.economic_data.as_ref(),
        body.uploaded_file_count(),
    );
    let text = complete(&state, prompt, STRUCTURED_ANALYSIS, "structured").await?;
    let analysis = normalize_with(&text, state.config.schema_policy);

    Ok(Json(StructuredAnalysisResponse {
        success: true,
        analysis,
        timestamp: timestamp(),
    }))
}

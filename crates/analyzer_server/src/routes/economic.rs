use std::sync::Arc;

use analyzer_constant::limits::ECONOMIC_ANALYSIS;
use analyzer_core::{EconomicAnalysisRequest, build_economic_prompt};
use axum::Json;
use axum::extract::State;

use super::analyze::TextAnalysisResponse;
use super::complete;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// POST /analyze-economic: schema-hinted prompt, reply returned verbatim.
pub async fn analyze_economic(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<EconomicAnalysisRequest>,
) -> Result<Json<TextAnalysisResponse>, ApiError> {
    let Some(economic_data) = body.economic_data() else {
        return Err(ApiError::BadRequest("Missing economicData".to_string()));
    };

    let prompt = build_economic_prompt(economic_data);
    let analysis = complete(&state, prompt, ECONOMIC_ANALYSIS, "economic").await?;

    Ok(Json(TextAnalysisResponse { analysis }))
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::models::AnalysisRecord;
use crate::analysis::service::{analyze, get_analysis};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub document_id: Uuid,
    pub extracted_text: String,
}

/// POST /api/v1/analysis
///
/// A missing or non-string `extractedText` is rejected before the engine runs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalysisRecord>), AppError> {
    let Json(req) = payload?;
    let record = analyze(
        state.analysis_store.as_ref(),
        state.config.name_policy,
        req.document_id,
        &req.extracted_text,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/analysis/:document_id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AnalysisRecord>, AppError> {
    let Path(document_id) = path?;
    get_analysis(state.analysis_store.as_ref(), document_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No analysis for document {document_id}")))
}

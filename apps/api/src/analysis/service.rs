use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::contact::NamePolicy;
use crate::analysis::engine::analyze_text;
use crate::analysis::models::AnalysisRecord;
use crate::analysis::store::AnalysisStore;
use crate::errors::AppError;

/// Runs the engine over `extracted_text` and appends the result for `document_id`.
/// A store failure propagates unchanged; nothing is retried.
pub async fn analyze(
    store: &dyn AnalysisStore,
    name_policy: NamePolicy,
    document_id: Uuid,
    extracted_text: &str,
) -> Result<AnalysisRecord, AppError> {
    let record = AnalysisRecord::new(document_id, analyze_text(extracted_text, name_policy));

    if let Err(e) = store.insert(&record).await {
        error!("Failed to persist analysis for document {document_id}: {e}");
        return Err(e);
    }

    info!(
        "Stored analysis {} for document {document_id} (overall={}, skills={}, recommendations={})",
        record.id,
        record.quality_score.overall,
        record.skill_set.len(),
        record.recommendations.len()
    );
    Ok(record)
}

pub async fn get_analysis(
    store: &dyn AnalysisStore,
    document_id: Uuid,
) -> Result<Option<AnalysisRecord>, AppError> {
    store.latest(document_id).await
}

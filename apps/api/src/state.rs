use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::store::AnalysisStore;
use crate::config::Config;
use crate::documents::storage::DocumentStorage;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: DocumentStorage,
    pub llm: LlmClient,
    pub config: Config,
    /// Analysis persistence. Default: PgAnalysisStore backed by `db`.
    pub analysis_store: Arc<dyn AnalysisStore>,
}

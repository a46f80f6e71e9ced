pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::applications::handlers as applications;
use crate::assistant::handlers as assistant;
use crate::documents::handlers as documents;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/:document_id",
            get(analysis::handle_get_analysis),
        )
        // Documents
        .route(
            "/api/v1/documents",
            post(documents::handle_upload).get(documents::handle_list_documents),
        )
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_get_document).delete(documents::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/analyze",
            post(documents::handle_analyze_document),
        )
        // AI assistant
        .route(
            "/api/v1/assistant/resume-feedback",
            post(assistant::handle_resume_feedback),
        )
        .route(
            "/api/v1/assistant/cover-letter",
            post(assistant::handle_cover_letter),
        )
        // Application tracking
        .route(
            "/api/v1/applications",
            post(applications::handle_create_application)
                .get(applications::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .patch(applications::handle_update_application)
                .delete(applications::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        .with_state(state)
}

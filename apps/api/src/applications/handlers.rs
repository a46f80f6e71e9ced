//! Axum route handlers for the Applications API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;
use crate::errors::{require_non_blank, AppError};
use crate::models::application::{ApplicationRow, StatusEventRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub company: String,
    pub position: String,
    pub job_url: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub resume_document_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub job_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailResponse {
    pub application: ApplicationRow,
    pub status_history: Vec<StatusEventRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let Json(req) = payload?;
    require_non_blank("company", &req.company)?;
    require_non_blank("position", &req.position)?;
    let status = req.status.unwrap_or_default();

    let mut tx = state.db.begin().await?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, company, position, job_url, notes, status, resume_document_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.company.trim())
    .bind(req.position.trim())
    .bind(&req.job_url)
    .bind(&req.notes)
    .bind(status.as_str())
    .bind(req.resume_document_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| missing_document(e, req.resume_document_id))?;

    record_status_event(&mut tx, row.id, None, status, None).await?;
    tx.commit().await?;

    info!("Created application {} ({} @ {})", row.id, row.position, row.company);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/applications?status=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let Query(params) = query?;
    let rows = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT * FROM applications
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status.map(|s| s.as_str()))
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApplicationDetailResponse>, AppError> {
    let Path(id) = path?;
    let application = sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| not_found(id))?;

    let status_history = fetch_history(&state, id).await?;

    Ok(Json(ApplicationDetailResponse {
        application,
        status_history,
    }))
}

/// PATCH /api/v1/applications/:id
///
/// Only fields present in the body are changed.
pub async fn handle_update_application(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Result<Json<ApplicationRow>, AppError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    if let Some(company) = &req.company {
        require_non_blank("company", company)?;
    }
    if let Some(position) = &req.position {
        require_non_blank("position", position)?;
    }

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        UPDATE applications SET
            company    = COALESCE($2, company),
            position   = COALESCE($3, position),
            job_url    = COALESCE($4, job_url),
            notes      = COALESCE($5, notes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.company.as_deref().map(str::trim))
    .bind(req.position.as_deref().map(str::trim))
    .bind(&req.job_url)
    .bind(&req.notes)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(row))
}

/// PATCH /api/v1/applications/:id/status
///
/// Moves the application to a new status and appends a history event.
pub async fn handle_update_status(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ApplicationDetailResponse>, AppError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let mut tx = state.db.begin().await?;

    let current: String =
        sqlx::query_scalar("SELECT status FROM applications WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found(id))?;
    let current = current
        .parse::<ApplicationStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt status on {id}: {e}")))?;

    current
        .can_transition_to(req.status)
        .map_err(AppError::Validation)?;

    let application = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(req.status.as_str())
    .fetch_one(&mut *tx)
    .await?;

    record_status_event(&mut tx, id, Some(current), req.status, req.note.as_deref()).await?;
    tx.commit().await?;

    info!("Application {id} moved {current} -> {}", req.status);

    let status_history = fetch_history(&state, id).await?;
    Ok(Json(ApplicationDetailResponse {
        application,
        status_history,
    }))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let result = sqlx::query("DELETE FROM applications WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn record_status_event(
    tx: &mut Transaction<'_, Postgres>,
    application_id: Uuid,
    from: Option<ApplicationStatus>,
    to: ApplicationStatus,
    note: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO application_status_events
            (id, application_id, from_status, to_status, note)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application_id)
    .bind(from.map(|s| s.as_str()))
    .bind(to.as_str())
    .bind(note)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn fetch_history(state: &AppState, id: Uuid) -> Result<Vec<StatusEventRow>, AppError> {
    Ok(sqlx::query_as::<_, StatusEventRow>(
        "SELECT * FROM application_status_events WHERE application_id = $1 ORDER BY created_at ASC",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Application {id} not found"))
}

fn missing_document(e: sqlx::Error, document_id: Option<Uuid>) -> AppError {
    match (&e, document_id) {
        (sqlx::Error::Database(db), Some(doc)) if db.is_foreign_key_violation() => {
            AppError::Validation(format!("Resume document {doc} does not exist"))
        }
        _ => AppError::Database(e),
    }
}

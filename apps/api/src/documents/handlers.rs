//! Axum route handlers for the Documents API.

use std::future::Future;

use axum::{
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::models::AnalysisRecord;
use crate::analysis::service::analyze;
use crate::documents::extract::{extract_text, DocumentKind};
use crate::documents::storage::object_key;
use crate::errors::AppError;
use crate::models::document::{DocumentRow, DocumentSummaryRow};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: bytes::Bytes,
}

/// POST /api/v1/documents
///
/// Accepts a multipart `file` field, stores the bytes, extracts text and
/// records the document. Returns the stored row including extracted text.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentRow>), AppError> {
    let upload = read_file_field(multipart, state.config.max_upload_bytes).await?;

    let kind = DocumentKind::detect(upload.content_type.as_deref(), &upload.file_name)
        .ok_or_else(|| {
            AppError::Validation(
                "Unsupported file type; upload a PDF, PNG, JPEG, or plain text file".to_string(),
            )
        })?;

    let extraction = extract_text(kind, &upload.bytes, &state.llm).await?;

    let id = Uuid::new_v4();
    let s3_key = object_key(id, &upload.file_name);
    let size_bytes = upload.bytes.len() as i64;
    state
        .storage
        .put(&s3_key, upload.bytes.to_vec(), kind.content_type())
        .await?;

    let insert = sqlx::query_as::<_, DocumentRow>(
        r#"
        INSERT INTO documents
            (id, file_name, content_type, size_bytes, s3_key, extracted_text, extraction_method)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&upload.file_name)
    .bind(kind.content_type())
    .bind(size_bytes)
    .bind(&s3_key)
    .bind(&extraction.text)
    .bind(extraction.method.as_str())
    .fetch_one(&state.db);
    let row = insert_or_discard(&s3_key, insert, state.storage.delete(&s3_key)).await?;

    info!(
        "Stored document {id} ({} bytes, extraction={})",
        size_bytes,
        extraction.method.as_str()
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentSummaryRow>>, AppError> {
    let rows = sqlx::query_as::<_, DocumentSummaryRow>(
        r#"
        SELECT id, file_name, content_type, size_bytes, extraction_method,
               (extracted_text IS NOT NULL) AS has_text, created_at
        FROM documents
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DocumentRow>, AppError> {
    let Path(id) = path?;
    Ok(Json(fetch_document(&state, id).await?))
}

/// DELETE /api/v1/documents/:id
///
/// Removes the row (analyses cascade) and then the stored object. A failed
/// object delete is logged and does not restore the row.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let s3_key: Option<String> =
        sqlx::query_scalar("DELETE FROM documents WHERE id = $1 RETURNING s3_key")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let s3_key = s3_key.ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

    if let Err(e) = state.storage.delete(&s3_key).await {
        warn!("Document {id} deleted but object cleanup failed: {e}");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/analyze
///
/// Runs the resume quality engine on the document's stored text.
pub async fn handle_analyze_document(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<(StatusCode, Json<AnalysisRecord>), AppError> {
    let Path(id) = path?;
    let document = fetch_document(&state, id).await?;
    let text = document.extracted_text.ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Document {id} has no extracted text to analyze"))
    })?;

    let record = analyze(
        state.analysis_store.as_ref(),
        state.config.name_policy,
        id,
        &text,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Awaits the row insert. If it fails, the already-uploaded object is discarded
/// before the error is returned; a failed discard is only logged.
async fn insert_or_discard<T>(
    s3_key: &str,
    insert: impl Future<Output = Result<T, sqlx::Error>>,
    discard: impl Future<Output = Result<(), AppError>>,
) -> Result<T, AppError> {
    match insert.await {
        Ok(row) => Ok(row),
        Err(e) => {
            if let Err(cleanup) = discard.await {
                warn!("Insert failed and object {s3_key} could not be removed: {cleanup}");
            }
            Err(AppError::Database(e))
        }
    }
}

async fn fetch_document(state: &AppState, id: Uuid) -> Result<DocumentRow, AppError> {
    sqlx::query_as::<_, DocumentRow>("SELECT * FROM documents WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
}

async fn read_file_field(mut multipart: Multipart, max_bytes: usize) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {max_bytes} byte upload limit"
            )));
        }
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_failed_insert_discards_uploaded_object() {
        let discarded = AtomicBool::new(false);
        let result: Result<(), AppError> = insert_or_discard(
            "documents/x/cv.pdf",
            async { Err(sqlx::Error::PoolTimedOut) },
            async {
                discarded.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(discarded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_discard_keeps_database_error() {
        let result: Result<(), AppError> = insert_or_discard(
            "documents/x/cv.pdf",
            async { Err(sqlx::Error::PoolTimedOut) },
            async { Err(AppError::Storage("s3 down".to_string())) },
        )
        .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_successful_insert_keeps_object() {
        let discarded = AtomicBool::new(false);
        let row = insert_or_discard(
            "documents/x/cv.pdf",
            async { Ok::<_, sqlx::Error>(7) },
            async {
                discarded.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap();
        assert_eq!(row, 7);
        assert!(!discarded.load(Ordering::SeqCst));
    }
}

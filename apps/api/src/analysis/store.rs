//! Persistence seam for analysis records.
//!
//! `AppState` holds an `Arc<dyn AnalysisStore>`; production uses `PgAnalysisStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::analysis::models::{AnalysisRecord, ContactInfo, QualityScore, SectionFlags};
use crate::errors::AppError;

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Appends a record. Existing records for the same document are left untouched.
    async fn insert(&self, record: &AnalysisRecord) -> Result<(), AppError>;

    /// Most recent record for the document, if any.
    async fn latest(&self, document_id: Uuid) -> Result<Option<AnalysisRecord>, AppError>;
}

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AnalysisRow {
    id: Uuid,
    document_id: Uuid,
    contact_info: Json<ContactInfo>,
    section_flags: Json<SectionFlags>,
    skill_set: Vec<String>,
    quality_score: Json<QualityScore>,
    recommendations: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        AnalysisRecord {
            id: row.id,
            document_id: row.document_id,
            contact_info: row.contact_info.0,
            section_flags: row.section_flags.0,
            skill_set: row.skill_set,
            quality_score: row.quality_score.0,
            recommendations: row.recommendations,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn insert(&self, record: &AnalysisRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resume_analyses
                (id, document_id, contact_info, section_flags, skill_set,
                 quality_score, recommendations, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.document_id)
        .bind(Json(&record.contact_info))
        .bind(Json(&record.section_flags))
        .bind(&record.skill_set)
        .bind(Json(&record.quality_score))
        .bind(&record.recommendations)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!("Document {} not found", record.document_id))
            }
            other => AppError::Database(other),
        })?;
        Ok(())
    }

    async fn latest(&self, document_id: Uuid) -> Result<Option<AnalysisRecord>, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, document_id, contact_info, section_flags, skill_set,
                   quality_score, recommendations, created_at
            FROM resume_analyses
            WHERE document_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AnalysisRecord::from))
    }
}

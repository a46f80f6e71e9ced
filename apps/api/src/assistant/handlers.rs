use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assistant::{cover_letter, resume_feedback, CoverLetterInput, CoverLetterTone, ResumeFeedback};
use crate::errors::{require_non_blank, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeedbackRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    pub company_name: String,
    pub position: String,
    #[serde(default)]
    pub tone: CoverLetterTone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /api/v1/assistant/resume-feedback
pub async fn handle_resume_feedback(
    State(state): State<AppState>,
    payload: Result<Json<ResumeFeedbackRequest>, JsonRejection>,
) -> Result<Json<ResumeFeedback>, AppError> {
    let Json(req) = payload?;
    require_non_blank("resumeText", &req.resume_text)?;
    let job_description = req
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty());

    let feedback = resume_feedback(&state.llm, &req.resume_text, job_description).await?;
    Ok(Json(feedback))
}

/// POST /api/v1/assistant/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(req) = payload?;
    require_non_blank("resumeText", &req.resume_text)?;
    require_non_blank("jobDescription", &req.job_description)?;
    require_non_blank("companyName", &req.company_name)?;
    require_non_blank("position", &req.position)?;

    let letter = cover_letter(
        &state.llm,
        CoverLetterInput {
            resume_text: &req.resume_text,
            job_description: &req.job_description,
            company_name: req.company_name.trim(),
            position: req.position.trim(),
            tone: req.tone,
        },
    )
    .await?;

    Ok(Json(CoverLetterResponse {
        cover_letter: letter,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_request_tone_defaults() {
        let req: CoverLetterRequest = serde_json::from_str(
            r#"{"resumeText": "r", "jobDescription": "j", "companyName": "Acme", "position": "Dev"}"#,
        )
        .unwrap();
        assert_eq!(req.tone, CoverLetterTone::Professional);
    }
}

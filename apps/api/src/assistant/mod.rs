//! Assistant: LLM-backed resume feedback and cover-letter drafting.
//!
//! All model calls go through `llm_client`; this module only builds prompts
//! and shapes responses.

use serde::{Deserialize, Serialize};

use crate::assistant::prompts::{
    COVER_LETTER_PROMPT, COVER_LETTER_SYSTEM, JOB_SECTION_TEMPLATE, NO_JOB_SECTION,
    RESUME_FEEDBACK_PROMPT, RESUME_FEEDBACK_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;

pub mod handlers;
pub mod prompts;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeedback {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub match_score: Option<i64>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverLetterTone {
    #[default]
    Professional,
    Enthusiastic,
    Concise,
}

impl CoverLetterTone {
    fn instruction(&self) -> &'static str {
        match self {
            CoverLetterTone::Professional => {
                "Use a confident, professional tone."
            }
            CoverLetterTone::Enthusiastic => {
                "Use a warm, enthusiastic tone that shows genuine excitement about the company."
            }
            CoverLetterTone::Concise => {
                "Be direct and concise; every sentence should carry a concrete qualification."
            }
        }
    }
}

pub struct CoverLetterInput<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub company_name: &'a str,
    pub position: &'a str,
    pub tone: CoverLetterTone,
}

pub async fn resume_feedback(
    llm: &LlmClient,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<ResumeFeedback, AppError> {
    let prompt = build_feedback_prompt(resume_text, job_description);
    let system = format!("{RESUME_FEEDBACK_SYSTEM} {JSON_ONLY_SYSTEM} {GROUNDING_INSTRUCTION}");
    let feedback: ResumeFeedback = llm
        .generate_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Resume feedback failed: {e}")))?;
    Ok(sanitize_feedback(feedback, job_description.is_some()))
}

pub async fn cover_letter(llm: &LlmClient, input: CoverLetterInput<'_>) -> Result<String, AppError> {
    let prompt = build_cover_letter_prompt(&input);
    let system = format!("{COVER_LETTER_SYSTEM} {GROUNDING_INSTRUCTION}");
    let letter = llm
        .generate(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;
    Ok(letter.trim().to_string())
}

fn build_feedback_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let job_section = match job_description {
        Some(jd) => fill_template(JOB_SECTION_TEMPLATE, &[("job_description", jd)]),
        None => NO_JOB_SECTION.to_string(),
    };
    fill_template(
        RESUME_FEEDBACK_PROMPT,
        &[("job_section", &job_section), ("resume_text", resume_text)],
    )
}

fn build_cover_letter_prompt(input: &CoverLetterInput<'_>) -> String {
    fill_template(
        COVER_LETTER_PROMPT,
        &[
            ("position", input.position),
            ("company_name", input.company_name),
            ("tone_instruction", input.tone.instruction()),
            ("job_description", input.job_description),
            ("resume_text", input.resume_text),
        ],
    )
}

/// Fills `{name}` placeholders in a single left-to-right pass. Substituted
/// values are never rescanned; unknown braces are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Clamps the model's match score and drops it when there was no job to match.
fn sanitize_feedback(mut feedback: ResumeFeedback, has_job: bool) -> ResumeFeedback {
    feedback.match_score = if has_job {
        feedback.match_score.map(|s| s.clamp(0, 100))
    } else {
        None
    };
    feedback.strengths.retain(|s| !s.trim().is_empty());
    feedback.improvements.retain(|s| !s.trim().is_empty());
    feedback.missing_keywords.retain(|s| !s.trim().is_empty());
    feedback
}

pub const RESUME_FEEDBACK_SYSTEM: &str = "You are an experienced technical recruiter and resume coach.";

/// Placeholders: {resume_text}, {job_section}
pub const RESUME_FEEDBACK_PROMPT: &str = r#"Review the resume below and give concrete, actionable feedback.

{job_section}

RESUME:
"""
{resume_text}
"""

Return a JSON object with exactly these fields:
{
  "summary": "two or three sentence overall assessment",
  "strengths": ["specific strength", "..."],
  "improvements": ["specific, actionable improvement", "..."],
  "matchScore": <integer 0-100 estimating fit for the job, or null when no job description is given>,
  "missingKeywords": ["important keyword from the job description absent from the resume", "..."]
}"#;

pub const JOB_SECTION_TEMPLATE: &str = r#"Evaluate the resume against this job description:

JOB DESCRIPTION:
"""
{job_description}
""""#;

pub const NO_JOB_SECTION: &str = "No job description was provided. Evaluate the resume on its own merits, \
    set \"matchScore\" to null and \"missingKeywords\" to an empty list.";

pub const COVER_LETTER_SYSTEM: &str = "You are a professional career writer. \
    Write in plain text with no markdown, no placeholders in square brackets, and no commentary.";

/// Placeholders: {position}, {company_name}, {tone_instruction}, {resume_text}, {job_description}
pub const COVER_LETTER_PROMPT: &str = r#"Write a cover letter for the {position} position at {company_name}.

{tone_instruction}
Keep it to three or four paragraphs and under 400 words. Open with a greeting and close with a sign-off.

CANDIDATE RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_description}
"""

Output only the letter text."#;

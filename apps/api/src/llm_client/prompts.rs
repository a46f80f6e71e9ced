// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that works from a candidate's resume.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only use facts present in the resume text provided. \
    Do NOT invent employers, dates, degrees, metrics, or skills. \
    If the resume does not support a claim, leave it out.";

// Shared prompt fragments.
// Each feature keeps its own prompt templates in its own prompts.rs; this file
// holds the pieces every structured-output prompt appends.

/// Appended to prompts that expect a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Appended to prompts that expect a short plain-text answer.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond with only the answer, no quotes or explanation.";

// Shared prompt fragments and prompt-building utilities.
// Each operation's template lives in writing/prompts.rs; this file holds the
// cross-cutting reply-format rules.

/// Appended to every template that expects a JSON object back.
pub const JSON_OBJECT_ONLY: &str = "Respond with ONLY a valid JSON object (no markdown formatting, \
    no code fences) in this exact format. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or commentary.";

/// Appended to every template that expects a JSON array back.
pub const JSON_ARRAY_ONLY: &str = "Respond with ONLY a valid JSON array (no markdown formatting, \
    no code fences) in this exact format. \
    Do NOT include any text outside the JSON array. \
    Do NOT include explanations or commentary.";

/// Plain-text operations ask for the bare result.
pub const PLAIN_ONLY: &str = "Provide ONLY the result without any explanations or formatting.";

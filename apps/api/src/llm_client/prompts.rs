#![allow(dead_code)]

// Cross-cutting prompt fragments shared by all generation-consuming modules.
// Each service defines its own prompts.rs alongside it for task-specific text.

/// Instruction block appended to the strict retry prompt after a failed
/// extraction. Demands a bare JSON array — no fences, no commentary.
pub const STRICT_ARRAY_INSTRUCTION: &str = "\
    Return ONLY a valid JSON array. \
    Do NOT include any text before or after the array. \
    Do NOT use markdown code fences such as ```json or ```. \
    Do NOT include explanations, apologies, or commentary. \
    The first character of your response must be '[' and the last must be ']'.";

/// Instruction block embedded in object-producing prompts.
pub const JSON_OBJECT_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

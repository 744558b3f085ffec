// Adaptive quiz question generation.
// One model call per question, strict shape validation, no retry — a
// malformed response is a terminal failure for the request.

pub mod handlers;
pub mod prompts;
pub mod synthesizer;

// Career recommendation engine.
// Two paths share the same schema: the AI path generates freely from the
// profile analysis; the document-grounded path restricts output to careers
// present in the cached reference PDF and degrades to empty on any failure.

pub mod document;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod recommender;

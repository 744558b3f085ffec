use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::recommend::document::DocumentCache;
use crate::websearch::ports::SearchPort;

/// Shared application state injected into all route handlers via Axum
/// extractors. No cross-request mutable state lives here except the
/// write-once document cache.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    pub search: Arc<dyn SearchPort>,
    /// Lazily populated careers-PDF text, shared across requests.
    pub document: Arc<DocumentCache>,
    pub config: Config,
}

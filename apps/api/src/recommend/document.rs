//! Document-Grounded Recommender — restricts recommendations to careers
//! present in a cached reference PDF.
//!
//! The cache is a process-wide write-once value: populated lazily on first
//! use, never invalidated. The whole path is best-effort — any failure
//! degrades to an empty list and never aborts the overall request.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::structured::generate_array;
use crate::llm_client::TextGenerator;
use crate::recommend::models::CareerRecommendation;
use crate::recommend::prompts::{DOCUMENT_PROMPT_TEMPLATE, DOCUMENT_SCHEMA_HINT};
use crate::recommend::recommender::harden;

/// Match-score range for the document-grounded path.
pub const DOC_MATCH_RANGE: (i64, i64) = (85, 98);

/// Page and character bounds on the cached document text.
const MAX_PAGES: usize = 8;
const MAX_CHARS: usize = 15_000;

/// Lazily populated cache of the reference document's extracted text.
pub struct DocumentCache {
    path: String,
    cell: OnceCell<String>,
}

impl DocumentCache {
    pub fn new(path: String) -> Self {
        Self {
            path,
            cell: OnceCell::new(),
        }
    }

    /// Returns the bounded document text, extracting it on first call.
    /// Extraction runs on the blocking pool; the guarded init means
    /// concurrent first callers race safely (first writer wins).
    pub async fn text(&self) -> Result<&str, AppError> {
        let text = self
            .cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("extract task failed: {e}")))?
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!(
                            "failed to extract text from '{}': {e}",
                            self.path
                        ))
                    })?;
                let bounded = bound_document_text(&raw, MAX_PAGES, MAX_CHARS);
                info!(
                    "Cached careers document '{}' ({} chars)",
                    self.path,
                    bounded.len()
                );
                Ok::<_, AppError>(bounded)
            })
            .await?;
        Ok(text)
    }
}

/// Bounds extracted text to the first `max_pages` pages (form-feed page
/// breaks) and `max_chars` characters.
fn bound_document_text(raw: &str, max_pages: usize, max_chars: usize) -> String {
    let paged: String = raw
        .split('\u{c}')
        .take(max_pages)
        .collect::<Vec<_>>()
        .join("\n");
    paged.chars().take(max_chars).collect()
}

/// Recommends careers present in the reference document.
/// Returns an empty list on any failure — document load, provider error,
/// or extraction failure — after logging the cause.
pub async fn recommend_from_document(
    llm: &dyn TextGenerator,
    model: &str,
    cache: &DocumentCache,
    analysis: &str,
) -> Vec<CareerRecommendation> {
    let document = match cache.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Careers document unavailable, skipping document path: {e:?}");
            return Vec::new();
        }
    };

    let prompt = DOCUMENT_PROMPT_TEMPLATE
        .replace("{analysis}", analysis)
        .replace("{document}", document);

    match generate_array(llm, model, &prompt, DOCUMENT_SCHEMA_HINT).await {
        Ok(items) => harden(items, DOC_MATCH_RANGE),
        Err(e) => {
            warn!("Document-grounded recommendation failed: {e:?}");
            Vec::new()
        }
    }
}

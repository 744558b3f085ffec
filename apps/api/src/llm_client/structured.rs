//! Retrying Generator — composes the text-generation port with the
//! structured-output extractor.
//!
//! Protocol: one generation call, one extraction attempt, and on extraction
//! failure exactly one stricter retry. Worst case is two model calls per
//! logical request. Provider errors are never retried here — only
//! malformed output is.

use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::extract::extract_array;
use crate::llm_client::prompts::STRICT_ARRAY_INSTRUCTION;
use crate::llm_client::TextGenerator;

/// Max characters of raw model output surfaced in an extraction error.
const PREVIEW_CHARS: usize = 200;

/// Generates a JSON array from the model, retrying once with a stricter
/// prompt if the first response cannot be coerced to an array.
///
/// No element-count or field-shape validation happens at this layer;
/// callers re-validate against their own schemas.
pub async fn generate_array(
    llm: &dyn TextGenerator,
    model: &str,
    prompt: &str,
    schema_hint: &str,
) -> Result<Vec<Value>, AppError> {
    let raw = llm.generate(prompt, model).await?;

    if let Some(Value::Array(items)) = extract_array(&raw) {
        return Ok(items);
    }

    warn!(
        "Array extraction failed, issuing strict retry (raw preview: {})",
        preview(&raw)
    );

    let strict_prompt = format!("{schema_hint}\n\n{STRICT_ARRAY_INSTRUCTION}");
    let raw = llm.generate(&strict_prompt, model).await?;

    match extract_array(&raw) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(AppError::Extraction {
            preview: preview(&raw),
        }),
    }
}

/// Truncates raw output to a short diagnostic preview.
fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted generator: returns queued responses in order and counts calls.
    struct ScriptedGenerator {
        responses: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().map(String::from).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            responses
                .pop()
                .ok_or_else(|| AppError::Provider("script exhausted".to_string()))
        }
    }

    #[tokio::test]
    async fn test_first_success_makes_exactly_one_call() {
        let llm = ScriptedGenerator::new(vec![r#"[{"title": "Nurse"}]"#]);
        let items = generate_array(&llm, "test-model", "prompt", "hint")
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_then_success_makes_two_calls() {
        let llm = ScriptedGenerator::new(vec![
            "I'd be happy to help! Here are some careers...",
            r#"[{"title": "Nurse"}, {"title": "Teacher"}]"#,
        ]);
        let items = generate_array(&llm, "test-model", "prompt", "hint")
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_two_failures_is_terminal_with_preview() {
        let second = "still not json ".repeat(40);
        let llm = ScriptedGenerator::new(vec!["not json", &second]);
        let err = generate_array(&llm, "test-model", "prompt", "hint")
            .await
            .unwrap_err();
        assert_eq!(llm.call_count(), 2);
        match err {
            AppError::Extraction { preview } => {
                assert!(preview.chars().count() <= 200);
                assert!(preview.starts_with("still not json"));
            }
            other => panic!("expected Extraction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fenced_output_succeeds_without_retry() {
        let llm = ScriptedGenerator::new(vec![
            "```json\n[{\"title\":\"Nurse\",\"match\":90,\"description\":\"...\"}]\n```",
        ]);
        let items = generate_array(&llm, "test-model", "prompt", "hint")
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Nurse");
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let llm = ScriptedGenerator::new(vec![]);
        let err = generate_array(&llm, "test-model", "prompt", "hint")
            .await
            .unwrap_err();
        assert_eq!(llm.call_count(), 1);
        assert!(matches!(err, AppError::Provider(_)));
    }

    #[tokio::test]
    async fn test_retry_prompt_contains_schema_hint() {
        struct CapturingGenerator {
            prompts: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl TextGenerator for CapturingGenerator {
            async fn generate(&self, prompt: &str, _model: &str) -> Result<String, AppError> {
                self.prompts.lock().unwrap().push(prompt.to_string());
                Ok("no json here".to_string())
            }
        }

        let llm = CapturingGenerator {
            prompts: Mutex::new(vec![]),
        };
        let _ = generate_array(&llm, "test-model", "the task", "SCHEMA: [{\"title\": str}]").await;

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "the task");
        assert!(prompts[1].contains("SCHEMA"));
        assert!(prompts[1].contains("ONLY a valid JSON array"));
    }
}

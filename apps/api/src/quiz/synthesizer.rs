//! Quiz Question Synthesizer — produces one multiple-choice question
//! conditioned on the ordered question/answer history.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;

use crate::errors::AppError;
use crate::llm_client::extract::extract_object;
use crate::llm_client::TextGenerator;
use crate::quiz::prompts::QUESTION_PROMPT_HEADER;

/// One recorded question/answer pair. Order within the history is
/// significant — it drives follow-up question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// A validated multiple-choice question.
/// Constructed only via successful validation of model output:
/// `options` always holds exactly 4 non-empty entries.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// Generates the next quiz question from the session history.
///
/// Parses the model response as a JSON object (direct parse, falling back to
/// the structured-output extractor) and validates its shape. Any violation
/// is a `Validation` error surfaced to the caller — never a silent default.
pub async fn next_question(
    llm: &dyn TextGenerator,
    model: &str,
    history: &[QaPair],
) -> Result<GeneratedQuestion, AppError> {
    let prompt = build_question_prompt(history);
    let raw = llm.generate(&prompt, model).await?;

    let parsed = serde_json::from_str::<Value>(raw.trim())
        .ok()
        .filter(Value::is_object)
        .or_else(|| extract_object(&raw))
        .ok_or_else(|| {
            AppError::Validation("Model response did not contain a JSON object".to_string())
        })?;

    validate_question(&parsed)
}

/// Renders the prompt: fixed header followed by the ordered history.
fn build_question_prompt(history: &[QaPair]) -> String {
    let mut prompt = QUESTION_PROMPT_HEADER.to_string();
    for (i, qa) in history.iter().enumerate() {
        let _ = write!(
            prompt,
            "Question {}: {}\nAnswer: {}\n\n",
            i + 1,
            qa.question,
            qa.answer
        );
    }
    prompt
}

/// Validates the parsed object against the question contract:
/// a non-empty `question` string and exactly 4 non-empty `options`.
fn validate_question(parsed: &Value) -> Result<GeneratedQuestion, AppError> {
    let question = parsed
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Generated question is missing a 'question' string".to_string())
        })?;

    let options = parsed
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::Validation("Generated question is missing an 'options' array".to_string())
        })?;

    if options.len() != 4 {
        return Err(AppError::Validation(format!(
            "Generated question must have exactly 4 options, got {}",
            options.len()
        )));
    }

    let options: Vec<String> = options
        .iter()
        .map(|o| o.as_str().map(str::trim).unwrap_or("").to_string())
        .collect();

    if options.iter().any(String::is_empty) {
        return Err(AppError::Validation(
            "Generated question contains an empty option".to_string(),
        ));
    }

    Ok(GeneratedQuestion {
        question: question.to_string(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedGenerator(String);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, AppError> {
            Ok(self.0.clone())
        }
    }

    fn teams_history() -> Vec<QaPair> {
        vec![QaPair {
            question: "Do you prefer working alone or in teams?".to_string(),
            answer: "Teams".to_string(),
        }]
    }

    #[test]
    fn test_prompt_embeds_history_in_order() {
        let history = vec![
            QaPair {
                question: "First?".to_string(),
                answer: "A".to_string(),
            },
            QaPair {
                question: "Second?".to_string(),
                answer: "B".to_string(),
            },
        ];
        let prompt = build_question_prompt(&history);
        assert!(prompt.contains("Question 1: First?\nAnswer: A"));
        assert!(prompt.contains("Question 2: Second?\nAnswer: B"));
        assert!(prompt.find("First?").unwrap() < prompt.find("Second?").unwrap());
    }

    #[test]
    fn test_prompt_for_empty_history_is_just_the_header() {
        let prompt = build_question_prompt(&[]);
        assert!(prompt.ends_with("Previous Q&A History:\n"));
    }

    #[tokio::test]
    async fn test_empty_history_returns_a_question() {
        let llm = FixedGenerator(
            json!({
                "question": "What kind of problems excite you most?",
                "options": ["Technical", "Creative", "People", "Strategic"]
            })
            .to_string(),
        );
        let q = next_question(&llm, "test-model", &[]).await.unwrap();
        assert!(!q.question.is_empty());
        assert_eq!(q.options.len(), 4);
    }

    #[tokio::test]
    async fn test_next_question_differs_from_history() {
        let llm = FixedGenerator(
            json!({
                "question": "Which team role fits you best?",
                "options": ["Coordinator", "Specialist", "Mediator", "Driver"]
            })
            .to_string(),
        );
        let history = teams_history();
        let q = next_question(&llm, "test-model", &history).await.unwrap();
        assert_eq!(q.options.len(), 4);
        assert_ne!(q.question, history[0].question);
    }

    #[tokio::test]
    async fn test_fenced_response_is_accepted() {
        let llm = FixedGenerator(
            "```json\n{\"question\": \"Q?\", \"options\": [\"a\",\"b\",\"c\",\"d\"]}\n```"
                .to_string(),
        );
        let q = next_question(&llm, "test-model", &[]).await.unwrap();
        assert_eq!(q.question, "Q?");
    }

    #[tokio::test]
    async fn test_missing_options_is_a_validation_error() {
        let llm = FixedGenerator(json!({"question": "Q?"}).to_string());
        let err = next_question(&llm, "test-model", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_three_options_is_a_validation_error() {
        let llm = FixedGenerator(
            json!({"question": "Q?", "options": ["a", "b", "c"]}).to_string(),
        );
        let err = next_question(&llm, "test-model", &[]).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("exactly 4")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_option_is_a_validation_error() {
        let llm = FixedGenerator(
            json!({"question": "Q?", "options": ["a", "", "c", "d"]}).to_string(),
        );
        let err = next_question(&llm, "test-model", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_object_response_is_a_validation_error() {
        let llm = FixedGenerator("Sorry, I cannot help with that.".to_string());
        let err = next_question(&llm, "test-model", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

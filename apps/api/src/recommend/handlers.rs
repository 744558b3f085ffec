//! Axum handler for the analyze-answers pipeline.
//!
//! Stages run strictly sequentially — each stage's input is the previous
//! stage's output: analyze → recommend → document-grounded recommend.
//! The document path is best-effort; the AI path's failure fails the request.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::profile::{analyze, LocationPreferences, PriorSession};
use crate::errors::AppError;
use crate::quiz::synthesizer::QaPair;
use crate::recommend::document::recommend_from_document;
use crate::recommend::models::CareerRecommendation;
use crate::recommend::recommender::recommend;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeAnswersRequest {
    #[serde(default)]
    pub answers: Vec<QaPair>,
    /// Alias some clients send instead of `answers`.
    #[serde(default)]
    pub final_answers: Vec<QaPair>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub preferences: Option<LocationPreferences>,
    /// Prior-session summary merged in by the outer persistence layer.
    #[serde(default)]
    pub previous_analysis: Option<PriorSession>,
}

impl AnalyzeAnswersRequest {
    fn answers(&self) -> &[QaPair] {
        if self.answers.is_empty() {
            &self.final_answers
        } else {
            &self.answers
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeAnswersResponse {
    pub analysis: String,
    pub ai_generated_careers: Vec<CareerRecommendation>,
    pub pdf_based_careers: Vec<CareerRecommendation>,
}

/// POST /analyze-answers
///
/// Full recommendation pipeline for a completed assessment.
pub async fn handle_analyze_answers(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeAnswersRequest>,
) -> Result<Json<AnalyzeAnswersResponse>, AppError> {
    let answers = request.answers();
    if answers.is_empty() {
        return Err(AppError::Validation(
            "answers must contain at least one question/answer pair".to_string(),
        ));
    }

    let group_label = request.group_name.as_deref().unwrap_or("");
    info!(
        "Analyzing {} answers (group: {})",
        answers.len(),
        if group_label.is_empty() { "none" } else { group_label }
    );

    let analysis = analyze(
        state.llm.as_ref(),
        &state.config.analysis_model,
        answers,
        group_label,
        request.preferences.as_ref(),
        request.previous_analysis.as_ref(),
    )
    .await?;

    let prior_top = request
        .previous_analysis
        .as_ref()
        .map(|p| p.ai_careers.as_slice())
        .unwrap_or(&[]);

    let ai_generated_careers = recommend(
        state.llm.as_ref(),
        &state.config.career_model,
        &analysis,
        group_label,
        request.preferences.as_ref(),
        prior_top,
    )
    .await?;
    info!("AI path produced {} careers", ai_generated_careers.len());

    let pdf_based_careers = recommend_from_document(
        state.llm.as_ref(),
        &state.config.career_model,
        &state.document,
        &analysis,
    )
    .await;
    info!("Document path produced {} careers", pdf_based_careers.len());

    Ok(Json(AnalyzeAnswersResponse {
        analysis,
        ai_generated_careers,
        pdf_based_careers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::TextGenerator;
    use crate::recommend::document::DocumentCache;
    use crate::websearch::ports::SearchPort;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct FixedGenerator(String);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, AppError> {
            Ok(self.0.clone())
        }
    }

    struct NoSearch;

    #[async_trait]
    impl SearchPort for NoSearch {
        async fn search(&self, _query: &str, _n: usize) -> Result<Vec<String>, AppError> {
            Ok(Vec::new())
        }

        async fn fetch_page(&self, _url: &str) -> Result<String, AppError> {
            Err(AppError::Validation("unused".to_string()))
        }
    }

    fn test_state(llm_response: &str) -> AppState {
        AppState {
            llm: Arc::new(FixedGenerator(llm_response.to_string())),
            search: Arc::new(NoSearch),
            document: Arc::new(DocumentCache::new("/nonexistent/careers.pdf".to_string())),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                question_model: "test-model".to_string(),
                analysis_model: "test-model".to_string(),
                career_model: "test-model".to_string(),
                careers_doc_path: "/nonexistent/careers.pdf".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_pipeline_survives_missing_document() {
        let state = test_state(r#"[{"title":"Nurse","match":90,"description":"..."}]"#);
        let request: AnalyzeAnswersRequest = serde_json::from_value(json!({
            "answers": [{"question": "Q?", "answer": "A"}]
        }))
        .unwrap();

        let Json(response) = handle_analyze_answers(State(state), Json(request))
            .await
            .unwrap();
        assert_eq!(response.ai_generated_careers.len(), 1);
        assert_eq!(response.ai_generated_careers[0].title, "Nurse");
        assert!(response.pdf_based_careers.is_empty());
        assert!(!response.analysis.is_empty());
    }

    #[tokio::test]
    async fn test_empty_answers_is_a_validation_error() {
        let state = test_state("[]");
        let request: AnalyzeAnswersRequest = serde_json::from_value(json!({})).unwrap();
        let err = handle_analyze_answers(State(state), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_request_accepts_final_answers_alias() {
        let request: AnalyzeAnswersRequest = serde_json::from_value(json!({
            "final_answers": [{"question": "Q?", "answer": "A"}],
            "group_name": "Student"
        }))
        .unwrap();
        assert_eq!(request.answers().len(), 1);
    }

    #[test]
    fn test_answers_field_takes_precedence() {
        let request: AnalyzeAnswersRequest = serde_json::from_value(json!({
            "answers": [{"question": "Q1?", "answer": "A1"}, {"question": "Q2?", "answer": "A2"}],
            "final_answers": [{"question": "old", "answer": "old"}]
        }))
        .unwrap();
        assert_eq!(request.answers().len(), 2);
        assert_eq!(request.answers()[0].question, "Q1?");
    }

    #[test]
    fn test_request_parses_prior_session() {
        let request: AnalyzeAnswersRequest = serde_json::from_value(json!({
            "answers": [{"question": "Q?", "answer": "A"}],
            "previous_analysis": {
                "aiCareers": [{"title": "Nurse", "match": 90}],
                "pdfCareers": [],
                "groupName": "Student"
            }
        }))
        .unwrap();
        let prior = request.previous_analysis.unwrap();
        assert_eq!(prior.ai_careers[0].title, "Nurse");
        assert_eq!(prior.ai_careers[0].match_score, Some(90));
    }

    #[test]
    fn test_response_serializes_both_career_fields() {
        let response = AnalyzeAnswersResponse {
            analysis: "profile text".to_string(),
            ai_generated_careers: vec![],
            pdf_based_careers: vec![],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("ai_generated_careers").is_some());
        assert!(value.get("pdf_based_careers").is_some());
    }
}

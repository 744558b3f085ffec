//! Axum route handler for quiz question generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::quiz::synthesizer::{next_question, QaPair};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionRequest {
    #[serde(rename = "previousQA", default)]
    pub previous_qa: Vec<QaPair>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionResponse {
    pub question: QuestionPayload,
}

/// Wire shape the assessment frontend expects.
#[derive(Debug, Serialize)]
pub struct QuestionPayload {
    pub id: usize,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: &'static str,
    pub options: Vec<String>,
}

/// POST /generate-question
///
/// Generates the next adaptive question from the session history.
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionRequest>,
) -> Result<Json<GenerateQuestionResponse>, AppError> {
    info!(
        "Generating question {} for session",
        request.previous_qa.len() + 1
    );

    let generated = next_question(
        state.llm.as_ref(),
        &state.config.question_model,
        &request.previous_qa,
    )
    .await?;

    Ok(Json(GenerateQuestionResponse {
        question: QuestionPayload {
            id: request.previous_qa.len() + 1,
            question: generated.question,
            question_type: "mcq",
            options: generated.options,
        },
    }))
}

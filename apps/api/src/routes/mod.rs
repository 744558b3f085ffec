pub mod health;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::quiz::handlers::handle_generate_question;
use crate::recommend::handlers::handle_analyze_answers;
use crate::state::AppState;
use crate::websearch::handlers::handle_web_search;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-question", post(handle_generate_question))
        .route("/analyze-answers", post(handle_analyze_answers))
        .route("/web-search", post(handle_web_search))
        .route("/test-api", get(handle_test_api))
        .with_state(state)
}

/// GET /test-api
/// One-shot provider liveness probe.
async fn handle_test_api(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let response = state
        .llm
        .generate("Hello, are you working?", &state.config.question_model)
        .await?;
    Ok(Json(json!({ "status": "ok", "response": response })))
}

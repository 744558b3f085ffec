//! Axum handler for web-mined career search.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::websearch::ranker::{rank_from_analysis, rank_from_seeds, SeedCareer, WebCareerCandidate};

/// Either a free-text analysis or a list of seed careers; seed careers win
/// when both are present.
#[derive(Debug, Deserialize)]
pub struct WebSearchRequest {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub careers: Option<Vec<SeedCareer>>,
}

#[derive(Debug, Serialize)]
pub struct WebSearchResponse {
    pub careers: Vec<WebCareerCandidate>,
}

/// POST /web-search
///
/// Mines and ranks live career candidates for the given seeds or analysis.
pub async fn handle_web_search(
    State(state): State<AppState>,
    Json(request): Json<WebSearchRequest>,
) -> Result<Json<WebSearchResponse>, AppError> {
    let careers = match (&request.careers, &request.analysis) {
        (Some(seeds), _) if !seeds.is_empty() => {
            rank_from_seeds(state.search.as_ref(), seeds).await?
        }
        (_, Some(analysis)) if !analysis.trim().is_empty() => {
            rank_from_analysis(state.search.as_ref(), analysis).await?
        }
        _ => {
            return Err(AppError::Validation(
                "Provide either 'careers' or a non-empty 'analysis'".to_string(),
            ))
        }
    };

    Ok(Json(WebSearchResponse { careers }))
}

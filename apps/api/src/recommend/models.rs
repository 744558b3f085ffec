//! Data model for career recommendations.

use serde::{Deserialize, Serialize};

/// Per-skill aptitude scores, each in [0,100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillScores {
    pub logic: i64,
    pub creativity: i64,
    pub social: i64,
    pub organization: i64,
}

/// A college suggestion attached to a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub name: String,
    pub program: String,
    pub duration: String,
    pub location: String,
}

/// One ranked career recommendation. `match` is the wire name the frontend
/// consumes; the valid range depends on the producing path (AI: 75–100,
/// document-grounded: 85–98) and is clamped post-parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    #[serde(rename = "match")]
    pub match_score: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<SkillScores>,
    /// Ordered Entry/Mid/Senior milestones when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colleges: Option<Vec<College>>,
}

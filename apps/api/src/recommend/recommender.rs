//! Career Recommender — turns a trait analysis into a ranked list of
//! career objects via the retrying structured generator.

use serde_json::Value;
use std::fmt::Write as _;
use tracing::warn;

use crate::analysis::profile::{LocationPreferences, PriorCareer};
use crate::errors::AppError;
use crate::llm_client::structured::generate_array;
use crate::llm_client::TextGenerator;
use crate::recommend::models::CareerRecommendation;
use crate::recommend::prompts::{CAREER_PROMPT_TEMPLATE, CAREER_SCHEMA_HINT};

/// Match-score range for the AI recommendation path.
pub const AI_MATCH_RANGE: (i64, i64) = (75, 100);

/// Expected entry count for a fresh recommendation set.
const EXPECTED_COUNT: usize = 5;

/// Generates the top-5 career recommendations for a profile analysis.
///
/// Location guidance is injected only when preferences carry a value, and a
/// bias clause discourages verbatim repeats of prior-session careers.
pub async fn recommend(
    llm: &dyn TextGenerator,
    model: &str,
    analysis: &str,
    group_label: &str,
    preferences: Option<&LocationPreferences>,
    prior_top_careers: &[PriorCareer],
) -> Result<Vec<CareerRecommendation>, AppError> {
    let extras = build_extras(group_label, preferences, prior_top_careers);
    let prompt = CAREER_PROMPT_TEMPLATE
        .replace("{analysis}", analysis)
        .replace("{extras}", &extras);

    let items = generate_array(llm, model, &prompt, CAREER_SCHEMA_HINT).await?;
    Ok(harden(items, AI_MATCH_RANGE))
}

/// Renders the optional prompt sections: group, location guidance, and the
/// prior-career bias clause.
fn build_extras(
    group_label: &str,
    preferences: Option<&LocationPreferences>,
    prior_top_careers: &[PriorCareer],
) -> String {
    let mut extras = String::new();

    if !group_label.trim().is_empty() {
        let _ = writeln!(extras, "\nCandidate group: {}", group_label.trim());
    }

    if let Some(prefs) = preferences.filter(|p| !p.is_empty()) {
        extras.push_str("\nLocation guidance: prefer colleges and job markets matching ");
        let mut parts = Vec::new();
        if let Some(v) = &prefs.study_country {
            parts.push(format!("study in {v}"));
        }
        if let Some(v) = &prefs.job_country {
            parts.push(format!("work in {v}"));
        }
        if let Some(v) = &prefs.state {
            parts.push(format!("state {v}"));
        }
        if let Some(v) = &prefs.district {
            parts.push(format!("district {v}"));
        }
        extras.push_str(&parts.join(", "));
        extras.push_str(".\n");
    }

    if !prior_top_careers.is_empty() {
        let titles: Vec<&str> = prior_top_careers
            .iter()
            .take(EXPECTED_COUNT)
            .map(|c| c.title.as_str())
            .collect();
        let _ = writeln!(
            extras,
            "\nThe user was previously recommended: {}. Avoid repeating these exact careers \
             unless the profile strongly supports them, and if repeated, add refreshed \
             roadmap and college details.",
            titles.join(", ")
        );
    }

    extras
}

/// Post-parse hardening: drops undeserializable elements, clamps `match`
/// into the path's range, and truncates to the expected count. Short lists
/// pass through with a warning — entries are never invented to pad.
pub fn harden(items: Vec<Value>, range: (i64, i64)) -> Vec<CareerRecommendation> {
    let mut careers: Vec<CareerRecommendation> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(career) => Some(career),
            Err(e) => {
                warn!("Dropping malformed career entry: {e}");
                None
            }
        })
        .collect();

    for career in &mut careers {
        career.match_score = career.match_score.clamp(range.0, range.1);
    }

    if careers.len() > EXPECTED_COUNT {
        warn!(
            "Model returned {} careers, truncating to {}",
            careers.len(),
            EXPECTED_COUNT
        );
        careers.truncate(EXPECTED_COUNT);
    } else if careers.len() < EXPECTED_COUNT {
        warn!("Model returned only {} careers", careers.len());
    }

    careers
}

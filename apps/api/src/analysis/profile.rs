//! Profile Analyzer — produces a free-text trait analysis from the answer
//! history plus optional personalization and prior-session context.
//!
//! The output is returned verbatim: it is consumed as unstructured input by
//! the recommendation stages, so no parsing or validation happens here.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::analysis::prompts::{ANALYSIS_PROMPT_HEADER, PRIOR_SESSION_INSTRUCTION};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::quiz::synthesizer::QaPair;

/// Character budget per prior-session career list embedded in the prompt.
const PRIOR_LIST_CHAR_BUDGET: usize = 600;

/// Location preferences attached to a user profile. All fields optional;
/// the location block is emitted only when at least one is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPreferences {
    pub job_country: Option<String>,
    pub study_country: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl LocationPreferences {
    pub fn is_empty(&self) -> bool {
        self.job_country.is_none()
            && self.study_country.is_none()
            && self.state.is_none()
            && self.district.is_none()
    }
}

/// Minimal record of a previously recommended career (title + match score).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorCareer {
    pub title: String,
    #[serde(rename = "match", default)]
    pub match_score: Option<i64>,
}

/// Summary of the user's previous assessment session, merged into the
/// request by the outer persistence layer when available.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorSession {
    #[serde(rename = "aiCareers", default)]
    pub ai_careers: Vec<PriorCareer>,
    #[serde(rename = "pdfCareers", default)]
    pub pdf_careers: Vec<PriorCareer>,
    #[serde(rename = "groupName", default)]
    pub group_name: Option<String>,
}

/// Runs the profile analysis and returns the generated text verbatim.
/// Provider failures propagate as-is.
pub async fn analyze(
    llm: &dyn TextGenerator,
    model: &str,
    answers: &[QaPair],
    group_label: &str,
    preferences: Option<&LocationPreferences>,
    prior: Option<&PriorSession>,
) -> Result<String, AppError> {
    let prompt = build_analysis_prompt(answers, group_label, preferences, prior);
    llm.generate(&prompt, model).await
}

fn build_analysis_prompt(
    answers: &[QaPair],
    group_label: &str,
    preferences: Option<&LocationPreferences>,
    prior: Option<&PriorSession>,
) -> String {
    let mut prompt = ANALYSIS_PROMPT_HEADER.to_string();

    if !group_label.trim().is_empty() {
        let _ = writeln!(prompt, "Candidate group: {}\n", group_label.trim());
    }

    if let Some(prefs) = preferences.filter(|p| !p.is_empty()) {
        prompt.push_str("Location context (factor into study and work suggestions):\n");
        if let Some(v) = &prefs.job_country {
            let _ = writeln!(prompt, "- Preferred job country: {v}");
        }
        if let Some(v) = &prefs.study_country {
            let _ = writeln!(prompt, "- Preferred study country: {v}");
        }
        if let Some(v) = &prefs.state {
            let _ = writeln!(prompt, "- State: {v}");
        }
        if let Some(v) = &prefs.district {
            let _ = writeln!(prompt, "- District: {v}");
        }
        prompt.push('\n');
    }

    if let Some(prior) = prior {
        let ai = render_prior_list(&prior.ai_careers);
        let pdf = render_prior_list(&prior.pdf_careers);
        if !ai.is_empty() || !pdf.is_empty() {
            prompt.push_str(PRIOR_SESSION_INSTRUCTION);
            if !ai.is_empty() {
                let _ = writeln!(prompt, "Previously recommended careers: {ai}");
            }
            if !pdf.is_empty() {
                let _ = writeln!(prompt, "Previously suggested from the careers guide: {pdf}");
            }
            prompt.push('\n');
        }
    }

    prompt.push_str("Responses to analyze:\n");
    for qa in answers {
        let _ = write!(prompt, "Q: {}\nSelected: {}\n\n", qa.question, qa.answer);
    }

    prompt
}

/// Renders prior careers as "Title (match%)" pairs, truncated to the
/// per-list character budget so a long history cannot dominate the prompt.
fn render_prior_list(careers: &[PriorCareer]) -> String {
    let mut out = String::new();
    for career in careers {
        let entry = match career.match_score {
            Some(score) => format!("{} ({}%)", career.title, score),
            None => career.title.clone(),
        };
        let sep = if out.is_empty() { "" } else { ", " };
        if out.chars().count() + sep.len() + entry.chars().count() > PRIOR_LIST_CHAR_BUDGET {
            break;
        }
        out.push_str(sep);
        out.push_str(&entry);
    }
    out
}

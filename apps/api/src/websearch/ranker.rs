//! Web-Mined Candidate Ranker — turns search results into scored career
//! candidates.
//!
//! The match score is deterministic: a base score plus a linear contribution
//! proportional to the fraction of seed terms literally present (as whole
//! words) in the page's title + description, clamped per path. Score ranges
//! differ between the two entry points and are intentionally kept separate.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::websearch::html::{extract_description, extract_skills, extract_title};
use crate::websearch::ports::SearchPort;

/// Analysis-driven path: 8 results, scores in (60, 95].
const ANALYSIS_RESULTS: usize = 8;
const ANALYSIS_BASE: u32 = 60;
const ANALYSIS_SPAN: u32 = 35;
const ANALYSIS_MAX: u32 = 95;

/// Seed-career path: 5 results, scores in (70, 98].
const SEED_RESULTS: usize = 5;
const SEED_BASE: u32 = 70;
const SEED_SPAN: u32 = 28;
const SEED_MAX: u32 = 98;

/// Distinct non-stopword terms drawn from a free-text analysis.
const ANALYSIS_TERM_LIMIT: usize = 10;
/// Seed career titles contributing to the search query.
const SEED_TITLE_LIMIT: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "with", "this", "that", "they",
    "them", "their", "from", "have", "has", "had", "was", "were", "will", "would", "could",
    "should", "into", "about", "more", "most", "also", "than", "then", "when", "where", "which",
    "while", "who", "whom", "these", "those", "such", "very", "can", "may", "might", "being",
    "over", "under", "each", "both", "own", "same", "other", "through", "strong", "shows",
    "prefers", "user", "candidate", "profile", "person", "individual",
];

/// A career candidate mined from one fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct WebCareerCandidate {
    pub title: String,
    pub description: String,
    #[serde(rename = "keySkills", skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<Vec<String>>,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "sourceLink")]
    pub source_link: String,
}

/// Seed career driving the seed-keyword search path.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCareer {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Ranks web candidates from a free-text profile analysis.
pub async fn rank_from_analysis(
    search: &dyn SearchPort,
    analysis: &str,
) -> Result<Vec<WebCareerCandidate>, AppError> {
    let terms = analysis_terms(analysis, ANALYSIS_TERM_LIMIT);
    if terms.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!("{} career path", terms.join(" "));

    rank(
        search,
        &query,
        &terms,
        ANALYSIS_RESULTS,
        ANALYSIS_BASE,
        ANALYSIS_SPAN,
        ANALYSIS_MAX,
    )
    .await
}

/// Ranks web candidates from previously recommended seed careers.
pub async fn rank_from_seeds(
    search: &dyn SearchPort,
    seeds: &[SeedCareer],
) -> Result<Vec<WebCareerCandidate>, AppError> {
    let titles: Vec<&str> = seeds
        .iter()
        .take(SEED_TITLE_LIMIT)
        .map(|s| s.title.as_str())
        .collect();
    if titles.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!("{} career opportunities", titles.join(" "));

    // Keywords come from every seed's title and description fragment.
    let seed_text = seeds
        .iter()
        .map(|s| format!("{} {}", s.title, s.description))
        .collect::<Vec<_>>()
        .join(" ");
    let terms = analysis_terms(&seed_text, ANALYSIS_TERM_LIMIT);

    rank(
        search, &query, &terms, SEED_RESULTS, SEED_BASE, SEED_SPAN, SEED_MAX,
    )
    .await
}

/// Shared ranking loop: search, fetch each page, extract fields, score,
/// filter, sort. Per-page failures are logged and skipped.
async fn rank(
    search: &dyn SearchPort,
    query: &str,
    terms: &[String],
    num_results: usize,
    base: u32,
    span: u32,
    max: u32,
) -> Result<Vec<WebCareerCandidate>, AppError> {
    info!("Web search: '{query}' ({num_results} results)");
    let urls = search.search(query, num_results).await?;

    let mut candidates = Vec::new();
    for url in urls {
        let html = match search.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping page: {e:?}");
                continue;
            }
        };

        let title = extract_title(&html);
        let description = extract_description(&html);
        let score = match_score(terms, &format!("{title} {description}"), base, span, max);

        // A candidate must beat its path's base score to survive.
        if score <= base {
            continue;
        }

        candidates.push(WebCareerCandidate {
            title,
            description,
            key_skills: extract_skills(&html),
            match_score: score,
            source_link: url,
        });
    }

    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    Ok(candidates)
}

/// Deterministic overlap score: `base + span × (matched / total)`, clamped
/// to `[base, max]`. Monotonically non-decreasing in matched terms.
pub fn match_score(terms: &[String], text: &str, base: u32, span: u32, max: u32) -> u32 {
    if terms.is_empty() {
        return base;
    }
    let words = word_set(text);
    let matched = terms
        .iter()
        .filter(|t| words.contains(t.to_lowercase().as_str()))
        .count();
    let fraction = matched as f64 / terms.len() as f64;
    let score = base + (span as f64 * fraction).round() as u32;
    score.clamp(base, max)
}

/// Distinct lowercase non-stopword terms (length > 2), in first-seen order.
pub fn analysis_terms(text: &str, limit: usize) -> Vec<String> {
    let word_re = Regex::new(r"[A-Za-z]+").expect("hardcoded regex is valid");
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for m in word_re.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if word.len() <= 2 || STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        if seen.insert(word.clone()) {
            terms.push(word);
            if terms.len() >= limit {
                break;
            }
        }
    }
    terms
}

/// Whole-word set of the text, lowercased.
fn word_set(text: &str) -> HashSet<String> {
    let word_re = Regex::new(r"[A-Za-z]+").expect("hardcoded regex is valid");
    word_re
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

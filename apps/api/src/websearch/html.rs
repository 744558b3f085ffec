//! Regex-based field extraction from fetched pages.
//!
//! Pulls a title, a description, and an optional short skills list from raw
//! HTML, with fixed placeholders when a page offers nothing usable.

use regex::Regex;

/// Placeholder when a page has no heading and no title tag.
pub const TITLE_PLACEHOLDER: &str = "Career Opportunity";
/// Placeholder when a page has no meta description and no paragraph.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 200;
const SKILLS_MAX_ITEMS: usize = 5;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded regex is valid")
}

/// First `<h1>`, else `<title>`, else the fixed placeholder.
/// Whitespace collapsed, truncated to 100 characters.
pub fn extract_title(html: &str) -> String {
    let candidate = re(r"(?is)<h1[^>]*>(.*?)</h1>")
        .captures(html)
        .or_else(|| re(r"(?is)<title[^>]*>(.*?)</title>").captures(html))
        .map(|cap| collapse_ws(&strip_tags(&cap[1])))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    candidate.chars().take(TITLE_MAX_CHARS).collect()
}

/// Meta description, else the first non-empty `<p>`, else the fixed
/// placeholder. Whitespace collapsed, truncated to 200 characters with an
/// ellipsis suffix when truncated.
pub fn extract_description(html: &str) -> String {
    let meta = re(r#"(?is)<meta[^>]*name=["']description["'][^>]*content=["']([^"']*)["']"#)
        .captures(html)
        .or_else(|| {
            re(r#"(?is)<meta[^>]*content=["']([^"']*)["'][^>]*name=["']description["']"#)
                .captures(html)
        })
        .map(|cap| collapse_ws(&strip_tags(&cap[1])))
        .filter(|d| !d.is_empty());

    let candidate = meta
        .or_else(|| {
            re(r"(?is)<p[^>]*>(.*?)</p>")
                .captures_iter(html)
                .map(|cap| collapse_ws(&strip_tags(&cap[1])))
                .find(|p| !p.is_empty())
        })
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());

    truncate_with_ellipsis(&candidate, DESCRIPTION_MAX_CHARS)
}

/// First `<ul>`/`<ol>` whose surrounding context mentions "skill"
/// (case-insensitive); up to 5 cleaned items. `None` when no such list.
pub fn extract_skills(html: &str) -> Option<Vec<String>> {
    let list_re = re(r"(?is)<(ul|ol)[^>]*>(.*?)</(?:ul|ol)>");
    let item_re = re(r"(?is)<li[^>]*>(.*?)</li>");

    for cap in list_re.captures_iter(html) {
        let whole = cap.get(0).expect("capture 0 always present");
        // Context window: the 200 characters leading up to the list plus the
        // list body itself — catches headings like "Key Skills" above it.
        let mut lead_start = whole.start().saturating_sub(200);
        while !html.is_char_boundary(lead_start) {
            lead_start -= 1;
        }
        let context = &html[lead_start..whole.end()];
        if !context.to_lowercase().contains("skill") {
            continue;
        }

        let items: Vec<String> = item_re
            .captures_iter(&cap[2])
            .map(|li| collapse_ws(&strip_tags(&li[1])))
            .filter(|item| !item.is_empty())
            .take(SKILLS_MAX_ITEMS)
            .collect();

        if !items.is_empty() {
            return Some(items);
        }
    }

    None
}

/// Removes markup and decodes the handful of entities that matter for
/// display text.
fn strip_tags(fragment: &str) -> String {
    let no_tags = re(r"(?s)<[^>]*>").replace_all(fragment, " ");
    no_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Collapses whitespace runs to single spaces and trims.
pub fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to `max_chars` total, replacing the tail with "..." when the
/// input is longer.
fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

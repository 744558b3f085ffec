//! Structured Output Extractor — recovers a single JSON value from raw model
//! output, tolerating code fences, surrounding prose, and nested brackets
//! inside string values.
//!
//! Every generation-consuming component routes through these functions.
//! Do NOT reimplement fence stripping at call sites.

use serde_json::Value;

/// Attempts to recover a JSON array from raw model output.
/// Returns `None` if nothing array-shaped can be parsed. Never panics.
pub fn extract_array(text: &str) -> Option<Value> {
    let stripped = strip_fences(text);

    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        if value.is_array() {
            return Some(value);
        }
    }

    let candidate = balanced_slice(stripped, '[', ']')?;
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_array)
}

/// Attempts to recover a JSON object from raw model output.
/// Returns `None` if nothing object-shaped can be parsed. Never panics.
pub fn extract_object(text: &str) -> Option<Value> {
    let stripped = strip_fences(text);

    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        if value.is_object() {
            return Some(value);
        }
    }

    let candidate = balanced_slice(stripped, '{', '}')?;
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}

/// Strips one leading fence marker (``` plus optional language tag up to the
/// end of its line) and one trailing ``` marker, each from one end only.
fn strip_fences(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag (e.g. "json") up to and including the newline.
        text = match rest.find('\n') {
            Some(idx) => rest[idx + 1..].trim_start(),
            // Single-line fence like "```json" with no content after it.
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text.trim()
}

/// Finds the first substring delimited by a balanced `open`/`close` pair,
/// tracking string literals so brackets inside JSON strings don't count.
fn balanced_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_parses_directly() {
        let out = extract_array(r#"[{"title": "Nurse"}]"#).unwrap();
        assert_eq!(out, json!([{"title": "Nurse"}]));
    }

    #[test]
    fn test_fenced_array_with_language_tag() {
        let raw = "```json\n[{\"title\":\"Nurse\",\"match\":90,\"description\":\"...\"}]\n```";
        let out = extract_array(raw).unwrap();
        assert_eq!(out[0]["title"], "Nurse");
        assert_eq!(out[0]["match"], 90);
    }

    #[test]
    fn test_fenced_array_without_language_tag() {
        let raw = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_array(raw).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_array_surrounded_by_prose() {
        let raw = "Here are your recommendations:\n[\"a\", \"b\"]\nLet me know if you need more.";
        assert_eq!(extract_array(raw).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_nested_brackets_inside_string_values() {
        let raw = r#"Sure! [{"note": "arrays look like [1,2] in JSON"}] done."#;
        let out = extract_array(raw).unwrap();
        assert_eq!(out[0]["note"], "arrays look like [1,2] in JSON");
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let raw = r#"[{"quote": "she said \"hi [there]\""}]"#;
        let out = extract_array(raw).unwrap();
        assert_eq!(out[0]["quote"], "she said \"hi [there]\"");
    }

    #[test]
    fn test_broken_json_returns_none() {
        assert!(extract_array(r#"[{"title": "Nurse""#).is_none());
        assert!(extract_object(r#"{"question": "#).is_none());
    }

    #[test]
    fn test_object_with_fences_and_prose() {
        let raw = "```json\n{\"question\": \"Q?\", \"options\": [\"a\",\"b\",\"c\",\"d\"]}\n```";
        let out = extract_object(raw).unwrap();
        assert_eq!(out["question"], "Q?");
        assert_eq!(out["options"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = "The question is {\"question\": \"Q?\", \"options\": []} as requested.";
        let out = extract_object(raw).unwrap();
        assert_eq!(out["question"], "Q?");
    }

    #[test]
    fn test_array_caller_rejects_object() {
        assert!(extract_array(r#"{"not": "an array"}"#).is_none());
    }

    #[test]
    fn test_object_caller_finds_first_object_before_array() {
        // Object mode must scan for braces, not brackets.
        let raw = r#"prefix {"a": [1, 2]} suffix"#;
        let out = extract_object(raw).unwrap();
        assert_eq!(out["a"], json!([1, 2]));
    }

    #[test]
    fn test_fence_stripped_from_one_end_only() {
        // A trailing fence with no leading one is still stripped once.
        let raw = "[1]\n```";
        assert_eq!(extract_array(raw).unwrap(), json!([1]));
    }

    #[test]
    fn test_empty_input_returns_none() {
        assert!(extract_array("").is_none());
        assert!(extract_object("   \n").is_none());
    }
}

// LLM prompt constants for profile analysis.

/// Profile-analysis prompt header. The answer history, optional location
/// context, and optional prior-session block are appended after this.
pub const ANALYSIS_PROMPT_HEADER: &str = r#"As a career analysis AI, create a comprehensive profile summary based on these multiple-choice responses.

Focus on:
1. Key personality traits
2. Professional interests
3. Skills and competencies
4. Work style preferences
5. Values and motivations
6. Learning style and adaptability
7. Leadership potential
8. Communication style
9. Decision-making approach
10. Career priorities

"#;

/// Appended when the user has prior-session recommendations, to bias the
/// analysis away from verbatim repetition across sessions.
pub const PRIOR_SESSION_INSTRUCTION: &str = "\
The user has completed a previous assessment. Their earlier recommendations are listed below. \
Weigh how the new answers differ from that session and surface any shift in traits or priorities \
rather than restating the earlier profile.\n";

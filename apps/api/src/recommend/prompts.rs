// LLM prompt constants for career recommendation.

/// Career-matching prompt template for the AI path.
/// Replace `{analysis}`, `{extras}` before sending.
pub const CAREER_PROMPT_TEMPLATE: &str = r#"As a career matching specialist, analyze this candidate profile and recommend the top 5 careers.

Candidate Profile:
{analysis}
{extras}
Return the response as a JSON array. Do not include any markdown formatting or code block indicators.
The response should match exactly this structure:
[
    {
        "title": "Career Title",
        "match": 85,
        "description": "Key reasons, required skills, growth potential, and work environment fit",
        "scores": {"logic": 80, "creativity": 60, "social": 70, "organization": 75},
        "roadmap": ["Entry: starting role", "Mid: growth role", "Senior: leadership role"],
        "colleges": [
            {"name": "Institution", "program": "Degree program", "duration": "Course length", "location": "City, Country"}
        ]
    }
]

Important:
- Return only the JSON array, no other text
- Do not include ```json or ``` markers
- Ensure valid JSON format
- Include exactly 5 career recommendations
- "match" must be an integer between 75 and 100
- "scores" values must be integers between 0 and 100
- "roadmap" must contain exactly 3 entries in Entry/Mid/Senior order"#;

/// Schema hint for the AI path. Self-contained: it restates the task so it
/// can stand alone as the strict retry prompt.
pub const CAREER_SCHEMA_HINT: &str = r#"Recommend the top 5 careers for the candidate profile you were just given.
Schema: a JSON array of exactly 5 objects, each with
- "title": string
- "match": integer 75-100
- "description": string
- "scores": object with integer fields "logic", "creativity", "social", "organization" (0-100)
- "roadmap": array of exactly 3 strings (Entry, Mid, Senior)
- "colleges": array of objects with string fields "name", "program", "duration", "location""#;

/// Document-grounded prompt template.
/// Replace `{analysis}`, `{document}` before sending.
pub const DOCUMENT_PROMPT_TEMPLATE: &str = r#"As a career matching specialist, recommend careers for this candidate using ONLY the careers listed in the reference document below. Do not suggest any career that does not literally appear in the document text.

Candidate Profile:
{analysis}

Reference document (career guide):
{document}

Return the response as a JSON array. Do not include any markdown formatting or code block indicators.
Each entry must match exactly this structure:
[
    {
        "title": "Career Title taken verbatim from the document",
        "match": 90,
        "description": "Why this documented career fits the profile"
    }
]

Important:
- Return only the JSON array, no other text
- "match" must be an integer between 85 and 98
- Every title must appear in the reference document"#;

/// Schema hint for the document-grounded path.
pub const DOCUMENT_SCHEMA_HINT: &str = r#"Recommend careers for the candidate, chosen only from the reference career guide you were just given.
Schema: a JSON array of objects, each with
- "title": string (must appear verbatim in the guide)
- "match": integer 85-98
- "description": string"#;

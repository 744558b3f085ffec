// LLM prompt constants for quiz question generation.

/// Question-generation prompt header. The ordered Q&A history is appended
/// after this block, one entry per `Question i: ...\nAnswer: ...` pair.
pub const QUESTION_PROMPT_HEADER: &str = r#"You are an AI career counselor. Based on the following previous questions and answers, generate a new multiple-choice question that will help determine the user's ideal career path.

Requirements:
1. Question must be different from previous ones
2. Build upon previous responses to dig deeper
3. Focus on career-relevant traits, skills, or preferences
4. Include 4 distinct and relevant options
5. Make options specific and mutually exclusive
6. Frame the question so a follow-up question can build on the answer

Format the response EXACTLY as this JSON:
{
    "question": "Your question text here",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"]
}

Respond with valid JSON only. Do NOT include any text outside the JSON object. Do NOT use markdown code fences.

Previous Q&A History:
"#;

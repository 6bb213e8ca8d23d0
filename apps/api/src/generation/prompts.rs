// LLM prompt constants for question generation.

/// System prompt — sets the recruiter persona and enforces JSON-only output.
pub const QUESTION_GENERATION_SYSTEM: &str =
    "You are a recruiting and selection specialist with broad experience \
    evaluating candidates for technical and non-technical positions. \
    You MUST respond with valid JSON only — a JSON array of question objects. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Question generation prompt template. Replace {title}, {company},
/// {description}, {skills}, {experience} and {ideal_profile} before sending.
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"Create exactly 5 challenging, role-specific interview questions for the following opening:

Title: {title}
Company: {company}
Description: {description}
Technical skills: {skills}
Experience: {experience}
Ideal profile: {ideal_profile}

GUIDELINES:
1. The questions must deeply probe the COGNITIVE ability, INTELLIGENCE and TECHNICAL SKILLS specific to this role.
2. Completely avoid generic questions that could apply to any opening.
3. Write questions that evaluate:
   - Ability to solve complex problems related to this field
   - Logical reasoning applied to the specific context of the role
   - The technical knowledge named in the required skills
   - Practical experience with real day-to-day situations of this position
   - Capacity for innovation and critical thinking in the context of the role
4. The questions must be challenging enough to separate exceptional candidates from average ones.
5. Include at least one question about how the candidate would handle a concrete problem they could face in this position.
6. Scale the complexity of the questions to the experience level the opening asks for.

Return ONLY the questions as a JSON array, like this example:
[
  { "question": "Question 1", "type": "text" },
  { "question": "Question 2", "type": "text" }
]"#;

// Prompt constants for question generation.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona prepended to the shared JSON-only instructions.
const QUESTION_PERSONA: &str = "You are an experienced examiner who writes clear, \
    unambiguous multiple-choice questions for printed quiz papers.";

/// Question generation prompt template.
/// Replace `{count}`, `{topic}`, `{level}` and `{kind}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Write {count} multiple-choice quiz questions about the following topic.

Topic: {topic}
Difficulty: {level}
Question style: {kind}

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "questionText": "Which type of encryption uses a single key for both encryption and decryption?",
      "options": [
        "Asymmetric Encryption",
        "Symmetric Encryption",
        "Public Key Encryption",
        "Hashing"
      ],
      "correctAnswer": "Symmetric Encryption"
    }
  ]
}

Rules:
- Exactly {count} questions, each on a different aspect of the topic.
- Every question has exactly 4 options and all 4 options are different.
- "correctAnswer" is copied character for character from one of the options.
- Vary the position of the correct answer between questions.
- Do not prefix options with letters or numbers; the paper adds "A)", "B)" and so on.
- Plain text only: no markdown, no LaTeX, no emoji.
"#;

pub fn question_system_prompt() -> String {
    format!("{QUESTION_PERSONA} {JSON_ONLY_SYSTEM}")
}

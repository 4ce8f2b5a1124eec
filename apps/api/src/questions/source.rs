//! Question Source: pluggable, trait-based producer of question sets.
//!
//! `AppState` holds an `Option<Arc<dyn QuestionSource>>`; it is `None` when no
//! LLM credentials are configured. Every source returns questions that already
//! pass `Question::validate`, so the paper composer never sees a malformed item.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::question::Question;
use crate::questions::prompts::{question_system_prompt, QUESTION_PROMPT_TEMPLATE};

/// Upper bound on questions per request.
pub const MAX_QUESTION_COUNT: u32 = 50;
const MAX_GENERATION_RETRIES: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// What the questions ask for: recall of concepts, judgement in a described
/// situation, or hands-on know-how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Conceptual,
    Scenario,
    Practical,
}

impl QuestionKind {
    fn describe(self) -> &'static str {
        match self {
            QuestionKind::Conceptual => "conceptual (definitions, principles, terminology)",
            QuestionKind::Scenario => "scenario-based (a short situation, then what to do or conclude)",
            QuestionKind::Practical => "practical (tools, commands, configuration, procedures)",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub topic: String,
    pub count: u32,
    #[serde(default)]
    pub level: Difficulty,
    #[serde(default)]
    pub kind: QuestionKind,
}

impl GenerateQuestionsRequest {
    /// Checks run in field order; the first failure is reported.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.topic.trim().is_empty() {
            return Err(AppError::Validation("Topic cannot be empty.".to_string()));
        }
        if self.count < 1 {
            return Err(AppError::Validation(
                "You must generate at least one question.".to_string(),
            ));
        }
        if self.count > MAX_QUESTION_COUNT {
            return Err(AppError::Validation(format!(
                "Cannot generate more than {MAX_QUESTION_COUNT} questions."
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn QuestionSource>`.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns between 1 and `request.count` valid, distinct questions.
    async fn generate(&self, request: &GenerateQuestionsRequest)
        -> Result<Vec<Question>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmQuestionSource
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmQuestionSource {
    llm: LlmClient,
}

impl LlmQuestionSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedQuestions {
    questions: Vec<Question>,
}

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    async fn generate(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> Result<Vec<Question>, AppError> {
        let prompt = build_question_prompt(request);
        let system = question_system_prompt();
        let wanted = request.count as usize;
        let mut best: Vec<Question> = Vec::new();

        for attempt in 0..=MAX_GENERATION_RETRIES {
            let reply: GeneratedQuestions = self
                .llm
                .call_json(&prompt, &system)
                .await
                .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

            let (accepted, rejected) = accept_questions(reply.questions, wanted);

            if accepted.len() == wanted {
                info!(
                    topic = %request.topic,
                    count = wanted,
                    rejected,
                    "Generated question set"
                );
                return Ok(accepted);
            }

            warn!(
                "Question generation attempt {}/{}: {} usable of {} requested ({} rejected)",
                attempt + 1,
                MAX_GENERATION_RETRIES + 1,
                accepted.len(),
                wanted,
                rejected
            );
            if accepted.len() > best.len() {
                best = accepted;
            }
        }

        if best.is_empty() {
            return Err(AppError::Llm(format!(
                "Question generation returned no usable questions after {} attempts",
                MAX_GENERATION_RETRIES + 1
            )));
        }
        Ok(best)
    }
}

/// Builds the generation prompt by filling the template.
pub fn build_question_prompt(request: &GenerateQuestionsRequest) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{count}", &request.count.to_string())
        .replace("{topic}", request.topic.trim())
        .replace("{level}", &request.level.to_string())
        .replace("{kind}", request.kind.describe())
}

/// Trims every field, drops invalid or repeated questions, and keeps at most
/// `wanted`. Returns the kept questions and the number rejected.
fn accept_questions(raw: Vec<Question>, wanted: usize) -> (Vec<Question>, usize) {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(wanted.min(raw.len()));
    let mut rejected = 0;

    for question in raw {
        if accepted.len() == wanted {
            break;
        }
        let question = Question {
            question_text: question.question_text.trim().to_string(),
            options: question.options.iter().map(|o| o.trim().to_string()).collect(),
            correct_answer: question.correct_answer.trim().to_string(),
        };
        if let Err(defect) = question.validate() {
            warn!(
                "Discarding generated question ({defect}): {:?}",
                question.question_text.chars().take(60).collect::<String>()
            );
            rejected += 1;
            continue;
        }
        if !seen.insert(question.question_text.to_lowercase()) {
            rejected += 1;
            continue;
        }
        accepted.push(question);
    }

    (accepted, rejected)
}

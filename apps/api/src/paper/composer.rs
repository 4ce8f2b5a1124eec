//! Paper composition: questions + heading → paginated `Document` → rendered bytes.
//!
//! Build order:
//! 1. Title block (centered heading)
//! 2. One atomic question block per question, in input order
//! 3. Forced page break
//! 4. "Answer Key" caption, then the answer-key table with a repeating header
//!
//! Validation runs before any layout work, so an invalid question set never
//! produces a partial document.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::layout::{
    block_geometry, option_letter, Block, Document, DocumentBuilder, PaginationState,
    PaperSettings, TableRenderer, TextMeasurer,
};
use crate::models::question::{Question, QuestionDefect};
use crate::paper::file_name::output_file_name;
use crate::paper::render::RenderBackend;
use crate::paper::PaperError;

pub const ANSWER_KEY_CAPTION: &str = "Answer Key";
pub const ANSWER_KEY_HEADER: [&str; 2] = ["Q. No.", "Correct Answer"];

/// A finished paper, ready to be sent or stored.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPaper {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub document: Document,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Validates, composes and renders a paper. The backend is invoked exactly once,
/// and only after composition succeeded.
pub fn generate_document(
    questions: &[Question],
    heading: &str,
    settings: &PaperSettings,
    measurer: &dyn TextMeasurer,
    backend: &dyn RenderBackend,
) -> Result<RenderedPaper, PaperError> {
    let started = Instant::now();
    let document = compose(questions, heading, settings, measurer)?;
    let bytes = backend.render(&document, heading, measurer)?;
    let file_name = output_file_name(heading, backend.extension());

    info!(
        file_name = %file_name,
        questions = questions.len(),
        pages = document.page_count(),
        overflows = document.diagnostics.len(),
        bytes = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Rendered quiz paper"
    );

    Ok(RenderedPaper {
        file_name,
        bytes,
        document,
    })
}

/// Lays out the question section and the answer key into pages.
pub fn compose(
    questions: &[Question],
    heading: &str,
    settings: &PaperSettings,
    measurer: &dyn TextMeasurer,
) -> Result<Document, PaperError> {
    validate_questions(questions)?;
    let answer_rows = answer_key_rows(questions)?;

    let spacing = &settings.spacing;
    let mut builder = DocumentBuilder::new(settings.geometry);
    let mut state = PaginationState::new(&settings.geometry);

    // Title
    let title = Block::Title {
        text: heading.trim().to_string(),
    };
    let height = block_height(&title, measurer, settings, "the heading")?;
    let (placement, next) = state.place(height, spacing.after_title);
    builder.push(title, placement);
    state = next;

    // Questions
    for (i, question) in questions.iter().enumerate() {
        let ordinal = i + 1;
        let block = Block::Question {
            ordinal,
            question_text: question.question_text.clone(),
            options: question.options.clone(),
        };
        let height = block_height(&block, measurer, settings, &format!("question {ordinal}"))?;
        let (placement, next) = state.place(height, spacing.between_questions);
        debug!(ordinal, page = placement.page, y = placement.y, height, "Placed question");
        builder.push(block, placement);
        state = next;
    }
    let question_pages = state.page_count();

    // Answer key
    state = state.force_break();
    let caption = measurer
        .measure(
            ANSWER_KEY_CAPTION,
            settings.geometry.content_width(),
            &settings.styles.caption,
        )
        .map_err(|source| PaperError::Measurement {
            context: "the answer key caption".to_string(),
            source,
        })?;

    let header = ANSWER_KEY_HEADER.iter().map(|c| c.to_string()).collect();
    let (placed, state) = TableRenderer::new(measurer, settings)
        .with_lead(caption.height + spacing.after_caption)
        .render(state, header, answer_rows)
        .map_err(|source| PaperError::Measurement {
            context: "the answer key".to_string(),
            source,
        })?;

    let answer_key_page = placed
        .first()
        .map(|(_, placement)| placement.page)
        .unwrap_or(state.page_index);
    for (block, placement) in placed {
        builder.push(block, placement);
    }
    builder.set_caption(answer_key_page, ANSWER_KEY_CAPTION);

    debug!(
        question_pages,
        total_pages = state.page_count(),
        "Composed quiz paper"
    );

    Ok(builder.finish(settings.clone(), answer_key_page))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Fails on the first empty set or invalid question.
pub fn validate_questions(questions: &[Question]) -> Result<(), PaperError> {
    if questions.is_empty() {
        return Err(PaperError::EmptyQuestionSet);
    }
    for (i, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|defect| PaperError::InvalidQuestion {
                ordinal: i + 1,
                defect,
            })?;
    }
    Ok(())
}

/// `[ordinal, "<letter>) <correct answer>"]` per question.
///
/// The letter is taken from the option order exactly as supplied, which is the
/// order the question block prints.
pub fn answer_key_rows(questions: &[Question]) -> Result<Vec<Vec<String>>, PaperError> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let index = question
                .correct_index()
                .ok_or_else(|| PaperError::InvalidQuestion {
                    ordinal: i + 1,
                    defect: QuestionDefect::AnswerNotInOptions(question.correct_answer.clone()),
                })?;
            Ok(vec![
                (i + 1).to_string(),
                format!("{}) {}", option_letter(index), question.correct_answer),
            ])
        })
        .collect()
}

fn block_height(
    block: &Block,
    measurer: &dyn TextMeasurer,
    settings: &PaperSettings,
    context: &str,
) -> Result<f32, PaperError> {
    block_geometry(block, measurer, settings)
        .map(|geometry| geometry.height)
        .map_err(|source| PaperError::Measurement {
            context: context.to_string(),
            source,
        })
}

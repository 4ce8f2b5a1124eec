use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every question is multiple choice with exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice quiz item as produced by the question generator.
///
/// Invariant (checked by `validate`): `correct_answer` is one of `options`, and the
/// options are exactly `OPTION_COUNT` distinct strings. The option order is the
/// order the paper prints, and the answer key letters refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionDefect {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected {expected} options, found {found}")]
    WrongOptionCount { expected: usize, found: usize },

    #[error("option {0} is empty")]
    EmptyOption(usize),

    #[error("option {0:?} appears more than once")]
    DuplicateOption(String),

    #[error("correct answer {0:?} is not one of the options")]
    AnswerNotInOptions(String),
}

impl Question {
    pub fn validate(&self) -> Result<(), QuestionDefect> {
        if self.question_text.trim().is_empty() {
            return Err(QuestionDefect::EmptyText);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionDefect::WrongOptionCount {
                expected: OPTION_COUNT,
                found: self.options.len(),
            });
        }
        for (i, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionDefect::EmptyOption(i + 1));
            }
            if self.options[..i].contains(option) {
                return Err(QuestionDefect::DuplicateOption(option.clone()));
            }
        }
        if self.correct_index().is_none() {
            return Err(QuestionDefect::AnswerNotInOptions(
                self.correct_answer.clone(),
            ));
        }
        Ok(())
    }

    /// Position of `correct_answer` within `options`, in the given order.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

#[cfg(test)]
pub(crate) fn question(text: &str, options: [&str; 4], correct: &str) -> Question {
    Question {
        question_text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_question_passes() {
        let q = question("2 + 2?", ["3", "4", "5", "22"], "4");
        assert_eq!(q.validate(), Ok(()));
        assert_eq!(q.correct_index(), Some(1));
    }

    #[test]
    fn test_answer_must_be_an_option() {
        let q = question("2 + 2?", ["3", "4", "5", "22"], "four");
        assert_eq!(
            q.validate(),
            Err(QuestionDefect::AnswerNotInOptions("four".to_string()))
        );
    }

    #[test]
    fn test_answer_match_is_exact() {
        let q = question("Capital?", ["Paris", "Rome", "Oslo", "Bern"], "paris");
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_option_count_is_enforced() {
        let q = Question {
            question_text: "Pick".to_string(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: "a".to_string(),
        };
        assert_eq!(
            q.validate(),
            Err(QuestionDefect::WrongOptionCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_duplicate_options_rejected() {
        let q = question("Pick", ["a", "b", "a", "c"], "a");
        assert_eq!(
            q.validate(),
            Err(QuestionDefect::DuplicateOption("a".to_string()))
        );
    }

    #[test]
    fn test_blank_text_and_options_rejected() {
        assert_eq!(
            question("  ", ["a", "b", "c", "d"], "a").validate(),
            Err(QuestionDefect::EmptyText)
        );
        assert_eq!(
            question("Pick", ["a", " ", "c", "d"], "a").validate(),
            Err(QuestionDefect::EmptyOption(2))
        );
    }

    #[test]
    fn test_deserializes_camel_case_wire_format() {
        let json = r#"{
            "questionText": "What does CVE stand for?",
            "options": ["A", "B", "C", "D"],
            "correctAnswer": "C"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_text, "What does CVE stand for?");
        assert_eq!(q.correct_index(), Some(2));
    }
}

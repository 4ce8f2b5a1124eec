//! Text measurement: wraps text to a width and reports the resulting height.
//!
//! `TextMeasurer::measure` is a provided method, so every implementation shares the
//! same greedy word-wrap: words are never split, a word wider than the line gets a
//! line to itself, and `\n` always starts a new line.

use serde::Serialize;
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontFace, TextStyle};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("character {ch:?} cannot be set in {face:?}")]
    UnsupportedCharacter { ch: char, face: FontFace },

    #[error("line width must be positive, got {0}")]
    InvalidWidth(f32),

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f32),
}

/// Wrapped text and the vertical space it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measured {
    pub lines: Vec<String>,
    /// `lines.len() × style.line_height()`, in points.
    pub height: f32,
}

/// Measurement capability injected into the composer and the rendering backend.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` on a single line, in points.
    fn width(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError>;

    /// Wraps `text` to `max_width` points.
    fn measure(
        &self,
        text: &str,
        max_width: f32,
        style: &TextStyle,
    ) -> Result<Measured, MeasureError> {
        if !(max_width > 0.0) {
            return Err(MeasureError::InvalidWidth(max_width));
        }
        if !(style.size_pt > 0.0) {
            return Err(MeasureError::InvalidFontSize(style.size_pt));
        }

        let space_w = self.width(" ", style)?;
        let mut lines: Vec<String> = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_w = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.width(word, style)?;
                if current.is_empty() {
                    current.push_str(word);
                    current_w = word_w;
                } else if current_w + space_w + word_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_w = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_w += space_w + word_w;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }

        let height = lines.len() as f32 * style.line_height();
        Ok(Measured { lines, height })
    }
}

/// Production measurer backed by the static base-14 tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricMeasurer;

impl TextMeasurer for MetricMeasurer {
    fn width(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError> {
        let metrics = get_metrics(&style.face);
        let mut em = 0.0_f32;
        for ch in text.chars() {
            em += metrics
                .advance(ch)
                .ok_or(MeasureError::UnsupportedCharacter {
                    ch,
                    face: style.face,
                })?;
        }
        Ok(em * style.size_pt)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Every char is `char_width` points wide, whatever the style.
    pub struct FixedWidthMeasurer {
        pub char_width: f32,
    }

    impl TextMeasurer for FixedWidthMeasurer {
        fn width(&self, text: &str, _style: &TextStyle) -> Result<f32, MeasureError> {
            Ok(text.chars().count() as f32 * self.char_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FixedWidthMeasurer;
    use super::*;

    fn style() -> TextStyle {
        TextStyle::new(FontFace::Helvetica, 10.0)
    }

    #[test]
    fn test_measure_short_text_is_one_line() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        let measured = m.measure("hello world", 100.0, &style()).unwrap();
        assert_eq!(measured.lines, vec!["hello world"]);
        assert!((measured.height - 11.5).abs() < 1e-4);
    }

    #[test]
    fn test_measure_wraps_at_word_boundary() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        // "aaa bbb" fills the 7pt line exactly
        let measured = m.measure("aaa bbb ccc", 7.0, &style()).unwrap();
        assert_eq!(measured.lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_measure_keeps_long_word_unsplit() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        let measured = m.measure("a supercalifragilistic b", 5.0, &style()).unwrap();
        assert_eq!(measured.lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_measure_empty_and_whitespace_is_zero_lines() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        for text in ["", "   ", "\n\n"] {
            let measured = m.measure(text, 50.0, &style()).unwrap();
            assert!(measured.lines.is_empty(), "{text:?} should have no lines");
            assert_eq!(measured.height, 0.0);
        }
    }

    #[test]
    fn test_measure_honours_explicit_newlines() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        let measured = m.measure("first\nsecond", 100.0, &style()).unwrap();
        assert_eq!(measured.lines, vec!["first", "second"]);
    }

    #[test]
    fn test_measure_collapses_runs_of_whitespace() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        let measured = m.measure("a   b\tc", 100.0, &style()).unwrap();
        assert_eq!(measured.lines, vec!["a b c"]);
    }

    #[test]
    fn test_measure_rejects_non_positive_width() {
        let m = FixedWidthMeasurer { char_width: 1.0 };
        assert_eq!(
            m.measure("x", 0.0, &style()),
            Err(MeasureError::InvalidWidth(0.0))
        );
        assert!(m.measure("x", f32::NAN, &style()).is_err());
    }

    #[test]
    fn test_metric_measurer_width_scales_with_size() {
        let m = MetricMeasurer;
        let small = m.width("Rust", &TextStyle::new(FontFace::Helvetica, 10.0)).unwrap();
        let large = m.width("Rust", &TextStyle::new(FontFace::Helvetica, 20.0)).unwrap();
        assert!((large - small * 2.0).abs() < 1e-3);
        // R(0.722) + u(0.556) + s(0.5) + t(0.278) = 2.056em
        assert!((small - 20.56).abs() < 1e-3);
    }

    #[test]
    fn test_metric_measurer_rejects_unencodable_text() {
        let err = MetricMeasurer
            .measure("What is 中?", 200.0, &style())
            .unwrap_err();
        assert_eq!(
            err,
            MeasureError::UnsupportedCharacter {
                ch: '中',
                face: FontFace::Helvetica
            }
        );
    }

    #[test]
    fn test_metric_measurer_wraps_realistic_question() {
        let text = "Which type of encryption uses a single key for both encryption and decryption?";
        let measured = MetricMeasurer.measure(text, 200.0, &style()).unwrap();
        assert!(measured.lines.len() >= 2);
        assert_eq!(measured.lines.join(" "), text);
        for line in &measured.lines {
            let w = MetricMeasurer.width(line, &style()).unwrap();
            assert!(w <= 200.0, "line {line:?} is {w}pt wide");
        }
    }
}

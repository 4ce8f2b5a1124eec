//! Output file naming for rendered papers.

/// Used when a heading has no ASCII letters or digits at all.
pub const DEFAULT_FILE_STEM: &str = "quiz";

/// Turns a free-text heading into a filesystem-safe token.
///
/// Every char outside `[A-Za-z0-9]` becomes `_` and the result is lowercased. A
/// heading with nothing alphanumeric in it (empty, punctuation, non-Latin script)
/// becomes `DEFAULT_FILE_STEM`. Total and idempotent.
pub fn sanitize(heading: &str) -> String {
    let token: String = heading
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if token.chars().any(|c| c.is_ascii_alphanumeric()) {
        token
    } else {
        DEFAULT_FILE_STEM.to_string()
    }
}

/// `"{sanitize(heading)}_paper.{extension}"`
pub fn output_file_name(heading: &str, extension: &str) -> String {
    format!("{}_paper.{extension}", sanitize(heading))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_and_lowercases() {
        assert_eq!(sanitize("Weekly Science Test"), "weekly_science_test");
        assert_eq!(sanitize("Unit-3: Cells & DNA"), "unit_3__cells___dna");
    }

    #[test]
    fn test_sanitize_defaults_when_nothing_survives() {
        assert_eq!(sanitize(""), DEFAULT_FILE_STEM);
        assert_eq!(sanitize("!!!"), DEFAULT_FILE_STEM);
        assert_eq!(sanitize("   "), DEFAULT_FILE_STEM);
        assert_eq!(sanitize("日本語"), DEFAULT_FILE_STEM);
    }

    #[test]
    fn test_sanitize_replaces_each_unicode_char_once() {
        assert_eq!(sanitize("Café Quiz"), "caf__quiz");
        assert_eq!(sanitize("Ünit 1"), "_nit_1");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "",
            "!!!",
            "Weekly Science Test",
            "Café Quiz",
            "日本語 test 😀",
            "__init__",
            "quiz",
            "MiXeD 123",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("Weekly Science Test", "pdf"),
            "weekly_science_test_paper.pdf"
        );
        assert_eq!(output_file_name("", "pdf"), "quiz_paper.pdf");
    }
}

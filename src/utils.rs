//! Small helpers shared by the library and the CLI.
//!
//! - File-name sanitization for article titles
//! - String truncation for log previews

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters no common filesystem accepts in a file name: ASCII control
/// characters plus `" < > | : * ? \ /`. Downloads are often copied between
/// machines, so the portable set applies on every host.
static INVALID_FILE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\x00-\x1F"<>|:*?\\/]+"#).expect("static file-name regex is valid")
});

/// Replace every run of reserved file-name characters with a single `_`.
///
/// Pure and idempotent: `_` is never reserved, so a second pass finds
/// nothing to replace.
///
/// # Examples
///
/// ```
/// use voa_downloader::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Report: Q1/Q2?!"), "Report_ Q1_Q2_!");
/// assert_eq!(sanitize_file_name("a//\\b"), "a_b");
/// ```
pub fn sanitize_file_name(title: &str) -> String {
    INVALID_FILE_NAME_CHARS.replace_all(title, "_").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_file_name("Report: Q1/Q2?!"), "Report_ Q1_Q2_!");
        assert_eq!(sanitize_file_name("What?*<>|Now"), "What_Now");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
    }

    #[test]
    fn test_sanitize_leaves_safe_titles_alone() {
        let title = "Scientists Find New Moon Around Saturn (2024) - 科学";
        assert_eq!(sanitize_file_name(title), title);
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for title in [
            "Report: Q1/Q2?!",
            "::__::",
            "a\\b/c:d*e?f\"g<h>i|j",
            "\u{1}\u{2}control",
            "plain",
        ] {
            let once = sanitize_file_name(title);
            assert_eq!(sanitize_file_name(&once), once, "not idempotent for {title:?}");
            assert!(!once.contains(['/', '\\', ':', '?', '*', '"', '<', '>', '|']));
        }
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let s = "éééé";
        let result = truncate_for_log(s, 3);
        assert!(result.starts_with('é'));
        assert!(result.ends_with("…(+6 bytes)"));
    }
}

//! Placeholder token format.
//!
//! A placeholder is an opaque token of form `[TAG_n]` standing in for a
//! real sensitive value. The ordinal is process-lifetime monotonic and
//! shared across all tags.

use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[A-Z][A-Z0-9]*_\d+\]").expect("placeholder regex is valid"));

/// Format a placeholder token for the given tag and ordinal.
pub fn format_placeholder(tag: &str, ordinal: u64) -> String {
    format!("[{tag}_{ordinal}]")
}

/// The regex matching any well-formed placeholder token. Used by the
/// reverse pass to scan rendered output for known tokens.
pub fn placeholder_regex() -> &'static Regex {
    &PLACEHOLDER_RE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_tag_and_ordinal() {
        assert_eq!(format_placeholder("EMAIL", 1), "[EMAIL_1]");
        assert_eq!(format_placeholder("CREDITCARD", 42), "[CREDITCARD_42]");
    }

    #[test]
    fn regex_matches_placeholders_only() {
        let re = placeholder_regex();
        assert!(re.is_match("see [PER_3] for details"));
        assert!(re.is_match("[LOC_10]"));
        assert!(!re.is_match("[lowercase_1]"));
        assert!(!re.is_match("[NOORDINAL]"));
        assert!(!re.is_match("PER_3"));
    }
}

//! Decides which parser handles a raw string.
//!
//! Tracked-change tags take priority over custom marks; plain markdown goes
//! to the standards-based parser.

use std::sync::OnceLock;

use regex::Regex;

use super::kinds::{ChangeTag, MarkTag};

static CHANGE_REGEX: OnceLock<Regex> = OnceLock::new();
static CHANGE_OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
static MARK_OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
static MARK_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn change_regex() -> &'static Regex {
    CHANGE_REGEX.get_or_init(|| Regex::new(ChangeTag::PATTERN).expect("Invalid change regex"))
}

pub(crate) fn change_open_regex() -> &'static Regex {
    CHANGE_OPEN_REGEX
        .get_or_init(|| Regex::new(ChangeTag::OPEN_PATTERN).expect("Invalid change open regex"))
}

pub(crate) fn mark_open_regex() -> &'static Regex {
    MARK_OPEN_REGEX
        .get_or_init(|| Regex::new(MarkTag::OPEN_PATTERN).expect("Invalid mark open regex"))
}

pub(crate) fn mark_regex() -> &'static Regex {
    MARK_REGEX.get_or_init(|| Regex::new(MarkTag::PATTERN).expect("Invalid mark regex"))
}

/// The parse strategy chosen for a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// At least one `[change ...]` tag.
    TrackedChanges,
    /// At least one `<mark ...>` tag and no tracked changes.
    Marks,
    /// Plain markdown.
    Standard,
}

/// Classifies `markdown`, testing for tracked changes first, then marks.
///
/// Opening tags are enough: an unterminated tag is still handled by the
/// custom parsers, which run it to the end of its span.
pub fn classify(markdown: &str) -> Strategy {
    if change_open_regex().is_match(markdown) {
        Strategy::TrackedChanges
    } else if mark_open_regex().is_match(markdown) {
        Strategy::Marks
    } else {
        Strategy::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain **markdown**", Strategy::Standard)]
    #[case("# Heading\n\n- item", Strategy::Standard)]
    #[case(r#"a <mark type="highlighted">b</mark>"#, Strategy::Marks)]
    #[case(r#"<mark type="comment" comment="x" ai-instructions="yes">b</mark>"#, Strategy::Marks)]
    #[case(r#"<mark type="read-only">unterminated"#, Strategy::Marks)]
    #[case(r#"[change type="create"]x[/change]"#, Strategy::TrackedChanges)]
    #[case(r#"[change type="delete" id="c1"]x[/change]"#, Strategy::TrackedChanges)]
    #[case(r#"[change type="deletion"]x[/change]"#, Strategy::TrackedChanges)]
    #[case(
        r#"[change type="update"]<mark type="highlighted">x</mark>[/change]"#,
        Strategy::TrackedChanges
    )]
    #[case(r#"<mark type="underline">x</mark>"#, Strategy::Standard)]
    #[case(r#"[change type="rename"]x[/change]"#, Strategy::Standard)]
    fn classifies_by_priority(#[case] input: &str, #[case] expected: Strategy) {
        assert_eq!(classify(input), expected);
    }

    #[test]
    fn change_regex_is_non_greedy_across_lines() {
        let input = "[change type=\"create\"]a\nb[/change] mid [change type=\"delete\"]c[/change]";
        let contents: Vec<_> = change_regex()
            .captures_iter(input)
            .map(|c| c.get(3).map(|m| m.as_str()).unwrap_or_default().to_string())
            .collect();
        assert_eq!(contents, vec!["a\nb", "c"]);
    }

    #[test]
    fn change_regex_captures_id() {
        let caps = change_regex()
            .captures(r#"[change type="update" id="abc-1"]x[/change]"#)
            .unwrap();
        assert_eq!(&caps[1], "update");
        assert_eq!(&caps[2], "abc-1");
    }
}

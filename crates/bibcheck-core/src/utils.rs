//! Utility functions for rule implementations.

use regex::{Match, Regex};

use crate::span::{contained_in_any, Span};

/// Compiles a pattern that is known to be valid at build time.
///
/// Intended for `LazyLock<Regex>` statics holding fixed patterns.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression.
#[allow(clippy::expect_used)]
#[must_use]
pub fn compile_static(pattern: &'static str) -> Regex {
    Regex::new(pattern).expect("static regex pattern must compile")
}

/// Collects the spans of every non-overlapping match of `re` in `text`.
#[must_use]
pub fn match_spans(re: &Regex, text: &str) -> Vec<Span> {
    re.find_iter(text).map(|m| Span::from(m.range())).collect()
}

/// Returns the first match of `re` that is not covered by any of `covered`.
///
/// Used by "must be wrapped" checks: `covered` holds the spans of the
/// accepted wrapping forms, and a bare occurrence is one outside all of them.
#[must_use]
pub fn first_match_outside<'t>(re: &Regex, text: &'t str, covered: &[Span]) -> Option<Match<'t>> {
    re.find_iter(text)
        .find(|m| !contained_in_any(&Span::from(m.range()), covered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_outside_skips_covered() {
        let re = compile_static(r"ab");
        let text = "[ab] ab";
        let covered = vec![Span::new(0, 4)];
        let m = first_match_outside(&re, text, &covered).unwrap();
        assert_eq!(m.start(), 5);
    }

    #[test]
    fn first_match_outside_none_when_all_covered() {
        let re = compile_static(r"ab");
        let covered = vec![Span::new(0, 4)];
        assert!(first_match_outside(&re, "[ab]", &covered).is_none());
    }

    #[test]
    fn match_spans_collects_all() {
        let re = compile_static(r"\d+");
        assert_eq!(
            match_spans(&re, "a1 b22"),
            vec![Span::new(1, 2), Span::new(4, 6)]
        );
    }
}

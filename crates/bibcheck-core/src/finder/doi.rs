//! DOI extraction.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_static;

/// `10.<registrant>/<suffix>` with the suffix limited to an allow-list.
static DOI: LazyLock<Regex> = LazyLock::new(|| compile_static(r"10\.\d{4,9}/[-._\\;()/:a-zA-Z0-9]+"));

/// Returns the byte range of the last DOI-shaped token in `text`.
///
/// Earlier DOI-shaped substrings can appear in free text; the citation DOI is
/// conventionally the final one.
#[must_use]
pub fn last_doi_range(text: &str) -> Option<Range<usize>> {
    DOI.find_iter(text).last().map(|m| m.range())
}

/// Returns the last DOI-shaped token in `text`, or an empty string.
#[must_use]
pub fn find_last_doi(text: &str) -> &str {
    last_doi_range(text).map_or("", |range| &text[range])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_doi() {
        assert_eq!(
            find_last_doi("This is a reference with DOI 10.1234/5678"),
            "10.1234/5678"
        );
    }

    #[test]
    fn multiple_dois_returns_last() {
        let text = "D. P. Aguillard \\textit{et al.}, \"Measurement of the Positive Muon Anomalous \
                    Magnetic Moment to 0.20 ppm\", \\textit{Phys. Rev. Lett.}, vol. 131, no. 16, \
                    p. 161802, Oct. 2023. doi:10.1103/PhysRevLett.131.161802.";
        assert_eq!(find_last_doi(text), "10.1103/PhysRevLett.131.161802.");
    }

    #[test]
    fn two_dois_in_free_text() {
        let text = "see 10.5555/first-one and then doi:10.18429/JACoW-IPAC2023-TUPM055";
        assert_eq!(find_last_doi(text), "10.18429/JACoW-IPAC2023-TUPM055");
    }

    #[test]
    fn no_doi() {
        assert_eq!(find_last_doi("This is a reference without any DOI"), "");
        assert_eq!(find_last_doi(""), "");
    }

    #[test]
    fn registrant_needs_four_digits() {
        assert_eq!(find_last_doi("10.123/abc"), "");
    }

    #[test]
    fn stops_at_closing_brace() {
        assert_eq!(find_last_doi("\\url{doi:10.1000/182}"), "10.1000/182");
    }
}

//! Document-body and abstract locators.

use crate::finder::comments::in_comment;
use crate::span::Span;

const DOCUMENT_BEGIN: &str = r"\begin{document}";
const DOCUMENT_END: &str = r"\end{document}";
const ABSTRACT_BEGIN: &str = r"\begin{abstract}";
const ABSTRACT_END: &str = r"\end{abstract}";

/// Returns the span of the first occurrence of `marker` that is not inside a
/// comment and, when `within` is given, lies inside it.
fn first_uncommented(
    text: &str,
    marker: &str,
    comments: &[Span],
    within: Option<&Span>,
) -> Option<Span> {
    text.match_indices(marker)
        .map(|(start, m)| Span::new(start, start + m.len()))
        .find(|span| !in_comment(span, comments) && within.map_or(true, |w| w.contains(span)))
}

/// Locates the main `document` environment.
///
/// The span runs from the start of the first uncommented `\begin{document}`
/// to the start of the first uncommented `\end{document}`. A missing begin
/// marker defaults the start to 0 and a missing end marker defaults the end
/// to the end of the text.
#[must_use]
pub fn find_document_body(text: &str, comments: &[Span]) -> Span {
    let start = first_uncommented(text, DOCUMENT_BEGIN, comments, None).map_or(0, |s| s.start);
    let end = first_uncommented(text, DOCUMENT_END, comments, None).map_or(text.len(), |s| s.start);

    if end < start {
        // An end marker before the first begin marker cannot close it.
        tracing::debug!(start, end, "document end precedes begin, extending to end of text");
        return Span::new(start, text.len());
    }

    Span::new(start, end)
}

/// Locates the `abstract` environment inside the document body.
///
/// Returns `None` unless both markers are found uncommented inside `body`.
#[must_use]
pub fn find_abstract(text: &str, body: &Span, comments: &[Span]) -> Option<Span> {
    let begin = first_uncommented(text, ABSTRACT_BEGIN, comments, Some(body))?;
    let end = first_uncommented(text, ABSTRACT_END, comments, Some(body))?;
    (begin.start <= end.start).then(|| Span::new(begin.start, end.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::comments::find_comments;

    fn body_of(text: &str) -> Span {
        find_document_body(text, &find_comments(text))
    }

    #[test]
    fn commented_begin_is_skipped() {
        let text = "%\\begin{document}\n\\begin{document}";
        assert_eq!(body_of(text), Span::new(18, text.len()));
    }

    #[test]
    fn later_commented_begin_is_ignored() {
        let text = "\\begin{document}\n%\\begin{document}";
        assert_eq!(body_of(text), Span::new(0, text.len()));
    }

    #[test]
    fn commented_end_is_skipped() {
        let text = "\\begin{document}\n%\\end{document}\nbody\n\\end{document}\n";
        let body = body_of(text);
        assert_eq!(body.start, 0);
        assert_eq!(body.end, text.rfind("\\end{document}").unwrap());
    }

    #[test]
    fn no_markers_covers_whole_text() {
        let text = "just some text";
        assert_eq!(body_of(text), Span::new(0, text.len()));
    }

    #[test]
    fn end_before_begin_extends_to_text_end() {
        let text = "\\end{document}\n\\begin{document}\nx";
        assert_eq!(body_of(text), Span::new(15, text.len()));
    }

    #[test]
    fn abstract_inside_body() {
        let text = "\\begin{document}\n\\begin{abstract}\nA\n\\end{abstract}\n\\end{document}";
        let comments = find_comments(text);
        let body = find_document_body(text, &comments);
        let span = find_abstract(text, &body, &comments).unwrap();
        assert_eq!(span.start, 17);
        assert_eq!(span.slice(text), Some("\\begin{abstract}\nA\n"));
    }

    #[test]
    fn abstract_requires_both_markers() {
        let text = "\\begin{document}\n\\begin{abstract}\nA\n\\end{document}";
        let comments = find_comments(text);
        let body = find_document_body(text, &comments);
        assert!(find_abstract(text, &body, &comments).is_none());
    }

    #[test]
    fn abstract_outside_body_is_ignored() {
        let text = "\\begin{abstract}x\\end{abstract}\n\\begin{document}\n\\end{document}";
        let comments = find_comments(text);
        let body = find_document_body(text, &comments);
        assert!(find_abstract(text, &body, &comments).is_none());
    }
}

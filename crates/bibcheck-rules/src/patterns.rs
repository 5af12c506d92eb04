//! Pattern fragments shared by the "et al." rules.

/// Any of the eight equivalent ways of opening italics around "et al.":
/// `\emph{`, `\textit{`, `\it{`, `\em{`, `\itshape{` (whitespace allowed
/// before the brace) and the group forms `{\it `, `{\em `, `{\itshape `.
macro_rules! italic_opener {
    () => {
        r"(?:\\emph\s*\{|\\textit\s*\{|\\it\s*\{|\\em\s*\{|\\itshape\s*\{|\{\\it\s+|\{\\em\s+|\{\\itshape\s+)"
    };
}

pub(crate) use italic_opener;

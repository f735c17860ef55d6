//! Quote scanner: find the string literal under a cursor
//!
//! A single left-to-right scan over one line of text. The scanner keeps
//! the currently open quote character (if any) and the offset where its
//! content began, closing a literal only on an unescaped occurrence of
//! the same quote character. When literals nest with differing quote
//! characters the outermost one wins, because the inner quotes are plain
//! content to the scan.

use crate::text::{line_at, Position, Span};
use serde::{Deserialize, Serialize};

/// A string literal found under the cursor.
///
/// `value` is the content between the delimiters, escapes retained
/// verbatim. The span's `start`/`end` exclude the quote characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralMatch {
    pub value: String,
    pub span: Span,
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\'' || c == '`'
}

/// Find the string literal containing `position` in `text`.
///
/// Resolves the cursor's line out of `text` and scans it; an
/// out-of-range line yields `None`.
pub fn string_at(text: &str, position: Position) -> Option<LiteralMatch> {
    let line = line_at(text, position.line)?;
    string_in_line(line, position.line, position.character)
}

/// Find the string literal containing the `cursor` offset in one line.
///
/// Total over any input: never panics, never errors. Returns `None`
/// when the cursor is not inside a literal, including the mismatched
/// case where an opening quote is never closed.
pub fn string_in_line(line: &str, line_no: usize, cursor: usize) -> Option<LiteralMatch> {
    let chars: Vec<char> = line.chars().collect();
    let mut open: Option<char> = None;
    let mut start = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        match open {
            None => {
                // No literal can contain the cursor once the scan has
                // passed it without an open quote.
                if i > cursor {
                    return None;
                }
                if is_quote(c) {
                    open = Some(c);
                    start = i + 1;
                }
            }
            Some(quote) => {
                let escaped = i > 0 && chars[i - 1] == '\\';
                if c == quote && !escaped {
                    if cursor <= i && cursor >= start {
                        return Some(LiteralMatch {
                            value: chars[start..i].iter().collect(),
                            span: Span {
                                line: line_no,
                                start,
                                end: i,
                            },
                        });
                    }
                    // Literal closed before the cursor: keep scanning
                    // for a later sibling.
                    open = None;
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(line: &str, cursor: usize) -> Option<LiteralMatch> {
        string_in_line(line, 1, cursor)
    }

    #[test]
    fn finds_single_quoted_string() {
        let found = locate("jumped 'over'", 9).unwrap();
        assert_eq!(found.value, "over");
        assert_eq!(
            found.span,
            Span {
                line: 1,
                start: 8,
                end: 12
            }
        );
    }

    #[test]
    fn finds_double_quoted_string() {
        let found = locate("jumped \"over\"", 9).unwrap();
        assert_eq!(found.value, "over");
        assert_eq!(
            found.span,
            Span {
                line: 1,
                start: 8,
                end: 12
            }
        );
    }

    #[test]
    fn finds_backtick_quoted_string() {
        let found = locate("jumped `over`", 9).unwrap();
        assert_eq!(found.value, "over");
        assert_eq!(found.span.start, 8);
        assert_eq!(found.span.end, 12);
    }

    #[test]
    fn mismatched_quotes_yield_none() {
        assert_eq!(locate("jumped \"over'", 9), None);
    }

    #[test]
    fn mismatched_quotes_yield_none_for_any_cursor() {
        let line = "jumped \"over'";
        for cursor in 0..line.len() {
            assert_eq!(locate(line, cursor), None, "cursor={}", cursor);
        }
    }

    #[test]
    fn outermost_string_wins_over_nested_quotes() {
        // Cursor inside "over": the single-quoted literal opened first,
        // so the double quotes are ordinary content.
        let found = locate("lorem 'jumped \"over\"' ipsum", 16).unwrap();
        assert_eq!(found.value, "jumped \"over\"");
        assert_eq!(
            found.span,
            Span {
                line: 1,
                start: 7,
                end: 20
            }
        );
    }

    #[test]
    fn escaped_double_quote_does_not_close() {
        let found = locate(r#"jumped "o\"ver""#, 13).unwrap();
        assert_eq!(found.value, r#"o\"ver"#);
        assert_eq!(found.span.start, 8);
        assert_eq!(found.span.end, 14);
    }

    #[test]
    fn escaped_single_quote_does_not_close() {
        let found = locate(r"jumped 'o\'ver'", 13).unwrap();
        assert_eq!(found.value, r"o\'ver");
        assert_eq!(found.span.start, 8);
        assert_eq!(found.span.end, 14);
    }

    #[test]
    fn resolves_among_several_strings_on_one_line() {
        let found = locate("'jumped' 'over'", 13).unwrap();
        assert_eq!(found.value, "over");
        assert_eq!(found.span.start, 10);
        assert_eq!(found.span.end, 14);
    }

    #[test]
    fn cursor_outside_any_literal_is_none() {
        assert_eq!(locate("jumped 'over'", 2), None);
        assert_eq!(locate("no quotes here", 5), None);
        assert_eq!(locate("'jumped' over", 12), None);
    }

    #[test]
    fn cursor_past_end_of_line_is_none() {
        assert_eq!(locate("jumped 'over'", 40), None);
    }

    #[test]
    fn empty_literal_matches_on_closing_quote() {
        let found = locate("x = ''", 5).unwrap();
        assert_eq!(found.value, "");
        assert_eq!(found.span.start, 5);
        assert_eq!(found.span.end, 5);
    }

    #[test]
    fn idempotent_over_repeated_calls() {
        let first = locate("jumped 'over'", 9);
        let second = locate("jumped 'over'", 9);
        assert_eq!(first, second);
    }

    #[test]
    fn string_at_resolves_the_cursor_line() {
        let text = "the quick brown fox\njumped 'over'\nthe lazy dog";
        let found = string_at(text, Position::new(1, 9)).unwrap();
        assert_eq!(found.value, "over");
        assert_eq!(
            found.span,
            Span {
                line: 1,
                start: 8,
                end: 12
            }
        );
    }

    #[test]
    fn string_at_out_of_range_line_is_none() {
        assert_eq!(string_at("one line", Position::new(3, 0)), None);
    }
}

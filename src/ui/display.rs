//! Generic utilities to lay out text in a terminal

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Shorten a string so that it only eats up `max_cols` columns, by eating up
/// the middle and replacing it with an ellipsis
///
/// Assumes absence of line feeds in the input string.
pub fn shorten(input: &str, max_cols: usize) -> Cow<'_, str> {
    // Handle trivial cases
    if input.width() <= max_cols {
        return Cow::Borrowed(input);
    }
    debug_assert!(input.chars().all(|c| c != '\r' && c != '\n'));
    if max_cols == 0 {
        return Cow::Borrowed("");
    }

    // Split our column budget into a header and trailer, find a header that
    // fits in its half of the budget
    let max_header_cols = (max_cols - 1) / 2;
    let mut header_cols = 0;
    let mut header_end = 0;
    for (offset, grapheme) in input.grapheme_indices(true) {
        let new_header_cols = header_cols + grapheme.width();
        if new_header_cols > max_header_cols {
            break;
        }
        header_cols = new_header_cols;
        header_end = offset + grapheme.len();
    }

    // Give whatever the header did not use to the trailer
    let max_trailer_cols = max_cols - 1 - header_cols;
    let mut trailer_cols = 0;
    let mut trailer_start = input.len();
    for (offset, grapheme) in input.grapheme_indices(true).rev() {
        let new_trailer_cols = trailer_cols + grapheme.width();
        if new_trailer_cols > max_trailer_cols {
            break;
        }
        trailer_cols = new_trailer_cols;
        trailer_start = offset;
    }

    Cow::Owned(format!(
        "{}…{}",
        &input[..header_end],
        &input[trailer_start..]
    ))
}

/// Pad a string with spaces on the right up to `cols` columns
pub fn pad_right(input: &str, cols: usize) -> String {
    let padding = cols.saturating_sub(input.width());
    format!("{input}{:padding$}", "")
}

/// Pad a string with spaces on the left up to `cols` columns
pub fn pad_left(input: &str, cols: usize) -> String {
    let padding = cols.saturating_sub(input.width());
    format!("{:padding$}{input}", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shorten() {
        const MOCK_STR: &str = "/usr/lib/python3.12/json/decoder.py:332(decode)";
        let check = |max_cols, expected: &str| {
            let actual = super::shorten(MOCK_STR, max_cols);
            assert_eq!(actual, expected);
            assert!(actual.width() <= max_cols);
        };
        check(60, MOCK_STR);
        check(MOCK_STR.len(), MOCK_STR);
        check(30, "/usr/lib/pytho….py:332(decode)");
        check(3, "/…)");
        check(1, "…");
        check(0, "");
    }

    #[test]
    fn shorten_wide_graphemes() {
        let shortened = super::shorten("日本語のパス/関数名", 9);
        assert_eq!(shortened, "日本…数名");
        assert!(shortened.width() <= 9);
    }

    #[test]
    fn padding() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(pad_left("abcdef", 4), "abcdef");
        assert_eq!(pad_right("日本", 5), "日本 ");
    }
}

//! Text measurement: greedy word wrapping, block height and title fitting.
//!
//! Everything here is a pure function of its inputs, so callers measure a
//! block before drawing it and can rely on the drawn height matching.

use crate::fonts::FontFace;

/// Most lines a fitted title may occupy before its size is reduced.
pub const MAX_TITLE_LINES: usize = 3;

/// Wraps `text` at word boundaries so no line is wider than `max_width`.
///
/// Explicit line breaks are kept, blank input lines become empty lines, and
/// a word wider than `max_width` sits alone on an overflowing line. Empty
/// text produces no lines.
pub fn wrap_lines(text: &str, face: &FontFace, size: f32, max_width: f32) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let space = face.string_width(" ", size);
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0f32;

        for word in source_line.split_whitespace() {
            let word_width = face.string_width(word, size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        lines.push(current);
    }
    lines
}

/// Wraps `text` to lines of at most `columns` characters, for monospaced
/// blocks. Whitespace runs collapse to one space and words longer than a
/// line are split across lines. Blank text yields no lines.
pub fn wrap_columns(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest: Vec<char> = word.chars().collect();
        let sep = usize::from(current_len > 0);
        if current_len + sep + rest.len() <= columns {
            if sep == 1 {
                current.push(' ');
            }
            current.extend(rest);
            current_len += sep + word.chars().count();
            continue;
        }
        if rest.len() > columns {
            // Long words fill what is left of the current line first.
            let room = columns.saturating_sub(current_len + sep);
            if room > 0 {
                if sep == 1 {
                    current.push(' ');
                }
                current.extend(rest.drain(..room));
            }
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        while rest.len() > columns {
            lines.push(rest.drain(..columns).collect());
        }
        current_len = rest.len();
        current.extend(rest);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Width of the widest wrapped line.
pub fn block_width(lines: &[String], face: &FontFace, size: f32) -> f32 {
    lines
        .iter()
        .map(|line| face.string_width(line, size))
        .fold(0.0, f32::max)
}

/// Rendered height of a block of `lines` lines.
pub fn lines_height(lines: usize, size: f32, line_height: f32) -> f32 {
    lines as f32 * size * line_height
}

/// Height `text` occupies once wrapped to `max_width`.
pub fn text_height(
    text: &str,
    face: &FontFace,
    size: f32,
    max_width: f32,
    line_height: f32,
) -> f32 {
    lines_height(wrap_lines(text, face, size, max_width).len(), size, line_height)
}

/// A title wrapped at the size chosen by [`fit_title`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedTitle {
    pub size: f32,
    pub lines: Vec<String>,
}

/// Picks the largest size, stepping down by one point from `max_size`, at
/// which `text` wraps to at most three lines. When no size above `min_size`
/// fits, the title is set at `min_size` whatever its line count.
pub fn fit_title(
    text: &str,
    face: &FontFace,
    max_size: f32,
    min_size: f32,
    max_width: f32,
) -> FittedTitle {
    let mut size = max_size;
    while size > min_size {
        let lines = wrap_lines(text, face, size, max_width);
        if lines.len() <= MAX_TITLE_LINES {
            return FittedTitle { size, lines };
        }
        size -= 1.0;
    }
    FittedTitle {
        size: min_size,
        lines: wrap_lines(text, face, min_size, max_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE: FontFace = FontFace::HELVETICA;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_lines("Hello world", &FACE, 12.0, 500.0), vec!["Hello world"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_lines("", &FACE, 12.0, 100.0).is_empty());
        assert_eq!(text_height("", &FACE, 12.0, 100.0, 1.65), 0.0);
    }

    #[test]
    fn no_wrapped_line_exceeds_the_width() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running \
                    across the meadow until the evening light fades away";
        let width = 120.0;
        let lines = wrap_lines(text, &FACE, 11.0, width);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(FACE.string_width(line, 11.0) <= width, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_lines("a Pneumonoultramicroscopicsilicovolcanoconiosis b", &FACE, 12.0, 60.0);
        assert_eq!(lines, vec!["a", "Pneumonoultramicroscopicsilicovolcanoconiosis", "b"]);
    }

    #[test]
    fn explicit_breaks_are_kept() {
        let lines = wrap_lines("one\n\ntwo", &FACE, 12.0, 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn measuring_is_deterministic() {
        let text = "Repeatable measurements make pagination decisions stable across runs.";
        let first = wrap_lines(text, &FACE, 10.5, 140.0);
        let second = wrap_lines(text, &FACE, 10.5, 140.0);
        assert_eq!(first, second);
    }

    #[test]
    fn height_grows_as_width_shrinks() {
        let text = "Measuring before drawing lets the paginator decide whether a \
                    paragraph fits on the current page or must move to the next one.";
        let mut width = 400.0;
        let mut previous = text_height(text, &FACE, 11.0, width, 1.65);
        while width > 80.0 {
            width /= 2.0;
            let height = text_height(text, &FACE, 11.0, width, 1.65);
            assert!(height > previous, "height did not grow at width {width}");
            previous = height;
        }
    }

    #[test]
    fn height_is_lines_times_size_times_factor() {
        let lines = wrap_lines("alpha beta gamma delta", &FACE, 10.0, 50.0).len();
        assert_eq!(text_height("alpha beta gamma delta", &FACE, 10.0, 50.0, 1.5), lines as f32 * 15.0);
    }

    #[test]
    fn column_wrapping_respects_the_limit() {
        assert!(wrap_columns("   ", 10).is_empty());
        assert_eq!(wrap_columns("one two three", 7), vec!["one two", "three"]);
        for line in wrap_columns("lorem ipsum dolor sit amet consectetur adipiscing elit", 12) {
            assert!(line.chars().count() <= 12, "{line}");
        }
    }

    #[test]
    fn column_wrapping_splits_long_words() {
        assert_eq!(wrap_columns("ab abcdefghij", 5), vec!["ab ab", "cdefg", "hij"]);
        assert_eq!(wrap_columns("abcdefghijkl", 4), vec!["abcd", "efgh", "ijkl"]);
    }

    #[test]
    fn short_titles_keep_the_maximum_size() {
        let fitted = fit_title("Short", &FACE, 20.0, 14.0, 300.0);
        assert_eq!(fitted.size, 20.0);
        assert_eq!(fitted.lines.len(), 1);
    }

    #[test]
    fn fitted_size_is_the_largest_that_fits() {
        let words = ["Finding", "Your", "Voice", "Through", "Daily", "Practice", "And", "Patient", "Revision"];
        for count in 1..=words.len() {
            for repeat in 1..=4 {
                let text = vec![words[..count].join(" "); repeat].join(" ");
                let fitted = fit_title(&text, &FACE, 20.0, 14.0, 180.0);
                assert!(fitted.size >= 14.0 && fitted.size <= 20.0);

                let mut size = 20.0;
                let mut expected = 14.0;
                while size > 14.0 {
                    if wrap_lines(&text, &FACE, size, 180.0).len() <= MAX_TITLE_LINES {
                        expected = size;
                        break;
                    }
                    size -= 1.0;
                }
                assert_eq!(fitted.size, expected, "text: {text}");
                if fitted.size > 14.0 {
                    assert!(fitted.lines.len() <= MAX_TITLE_LINES);
                }
            }
        }
    }

    #[test]
    fn very_long_titles_overflow_at_the_minimum() {
        let text = "word ".repeat(80);
        let fitted = fit_title(&text, &FACE, 20.0, 14.0, 120.0);
        assert_eq!(fitted.size, 14.0);
        assert!(fitted.lines.len() > MAX_TITLE_LINES);
    }
}

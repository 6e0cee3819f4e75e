//! Greedy word wrap
//!
//! Paragraphs (split on `\n`) always start on a fresh line, but share one
//! y cursor. Within a paragraph, words are appended until the estimated
//! width would exceed the limit. Two exceptions keep the output readable on
//! a narrow panel:
//!
//! - a single-character word is never moved to the next line alone; it is
//!   appended even if the line then runs over
//! - a word wider than a whole line is placed on its own line unsplit

use alloc::string::String;

use super::{FontMetrics, Layout, LayoutError, LayoutLine};

/// Wrap `text` into lines starting at `origin`
///
/// Returns the positioned lines and the y cursor below the last one. Empty
/// text produces no lines and leaves the cursor at `origin.1`.
pub fn wrap_text(
    text: &str,
    origin: (i32, i32),
    metrics: FontMetrics,
    max_width: i32,
) -> Result<Layout, LayoutError> {
    let (x, y) = origin;
    let mut layout = Layout {
        lines: alloc::vec::Vec::new(),
        end_y: y,
    };

    for paragraph in text.split('\n').filter(|p| !p.is_empty()) {
        let mut line = String::new();
        let mut line_chars = 0usize;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_chars = word.chars().count();
            // Width of the line with this word and its separating space
            let width = metrics.estimate_width(line_chars + word_chars + 1);

            if line_chars > 0 && width > i64::from(max_width) && word_chars != 1 {
                emit(&mut layout, core::mem::take(&mut line), x, metrics)?;
                line_chars = 0;
            }

            if line_chars > 0 {
                line.try_reserve(1)?;
                line.push(' ');
                line_chars += 1;
            }
            line.try_reserve(word.len())?;
            line.push_str(word);
            line_chars += word_chars;
        }

        if !line.is_empty() {
            emit(&mut layout, line, x, metrics)?;
        }
    }

    Ok(layout)
}

fn emit(layout: &mut Layout, text: String, x: i32, metrics: FontMetrics) -> Result<(), LayoutError> {
    layout.lines.try_reserve(1)?;
    layout.lines.push(LayoutLine {
        text,
        x,
        y: layout.end_y,
    });
    layout.end_y = layout.end_y.saturating_add(i32::from(metrics.line_height));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const METRICS: FontMetrics = FontMetrics::new(10, 30);

    fn texts(layout: &Layout) -> Vec<&str> {
        layout.texts().collect()
    }

    #[test]
    fn test_empty_text() {
        let layout = wrap_text("", (10, 100), METRICS, 120).unwrap();
        assert!(layout.lines.is_empty());
        assert_eq!(layout.end_y, 100);
    }

    #[test]
    fn test_whitespace_only() {
        let layout = wrap_text("  \n \n\n   ", (10, 100), METRICS, 120).unwrap();
        assert!(layout.lines.is_empty());
        assert_eq!(layout.end_y, 100);
    }

    #[test]
    fn test_paragraph_break_forces_new_line() {
        let layout = wrap_text("Hello\nWorld wide web", (10, 100), METRICS, 120).unwrap();
        assert_eq!(texts(&layout), ["Hello", "World wide", "web"]);
    }

    #[test]
    fn test_lines_positioned_down_the_page() {
        let layout = wrap_text("Hello\nWorld wide web", (10, 100), METRICS, 120).unwrap();
        let positions: Vec<(i32, i32)> = layout.lines.iter().map(|l| (l.x, l.y)).collect();
        assert_eq!(positions, [(10, 100), (10, 130), (10, 160)]);
        assert_eq!(layout.end_y, 190);
    }

    #[test]
    fn test_single_character_word_never_wrapped_alone() {
        // "aaaa bbbb" is 9 chars; adding " c" would need 11 * 10 > 100
        let layout = wrap_text("aaaa bbbb c dd", (0, 0), METRICS, 100).unwrap();
        assert_eq!(texts(&layout), ["aaaa bbbb c", "dd"]);
        assert!(layout.overflows(METRICS, 100));
    }

    #[test]
    fn test_long_word_on_its_own_line() {
        let layout = wrap_text("a supercalifragilistic word", (0, 0), METRICS, 100).unwrap();
        assert_eq!(texts(&layout), ["a", "supercalifragilistic", "word"]);
        assert!(layout.overflows(METRICS, 100));
    }

    #[test]
    fn test_long_first_word_not_preceded_by_empty_line() {
        let layout = wrap_text("abcdefghijklmnop", (0, 0), METRICS, 50).unwrap();
        assert_eq!(texts(&layout), ["abcdefghijklmnop"]);
        assert_eq!(layout.end_y, 30);
    }

    #[test]
    fn test_repeated_spaces_collapse() {
        let layout = wrap_text("one   two  three", (0, 0), METRICS, 1000).unwrap();
        assert_eq!(texts(&layout), ["one two three"]);
    }

    #[test]
    fn test_separator_counted_in_width() {
        // "ab cd" is 5 chars = 50px; the check counts the space: (2 + 2 + 1) * 10
        let fits = wrap_text("ab cd", (0, 0), METRICS, 50).unwrap();
        assert_eq!(texts(&fits), ["ab cd"]);

        let wraps = wrap_text("ab cd", (0, 0), METRICS, 49).unwrap();
        assert_eq!(texts(&wraps), ["ab", "cd"]);
    }

    #[test]
    fn test_card_geometry() {
        // 460px at 16px per char holds 28 characters
        let metrics = FontMetrics::new(16, 52);
        let text = "Actions are judged by intentions, so each man will have what he intended.";
        let layout = wrap_text(text, (10, 100), metrics, 460).unwrap();

        for line in &layout.lines {
            assert!(line.text.len() <= 28, "line too wide: {:?}", line.text);
        }
        assert_eq!(layout.lines.first().map(|l| l.y), Some(100));
        assert_eq!(layout.end_y, 100 + 52 * layout.lines.len() as i32);
        assert!(!layout.overflows(metrics, 460));
    }
}

//! Query surface for painting a window of the document.

use super::ViewState;
use crate::selector;
use crate::style::StyleTag;
use crate::unicode::{
    byte_offset_at_column, display_width, display_width_char, truncate_to_width,
};
use std::ops::Range;

const ELLIPSIS: &str = "\u{2026}";

/// Prompts narrower than this are not drawn.
const MIN_PROMPT_WIDTH: usize = 5;

/// One screen row of reflowed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Index of the document line this row belongs to.
    pub line: usize,
    /// Wrapped-row index within that line.
    pub row: usize,
    pub text: String,
    pub tag: StyleTag,
    /// Byte ranges within `text` covered by search matches.
    pub highlights: Vec<Range<usize>>,
    /// True for every wrapped row after a line's first.
    pub continuation: bool,
    /// Blank columns to draw in front of `text`.
    pub indent: usize,
    /// Selector number, shown in the selector column on the first
    /// visible row of a selectable line.
    pub selector: Option<String>,
}

/// Content of the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBar {
    /// Exactly as wide as requested, scroll percentage at the right.
    pub text: String,
    /// Byte index of the cell showing the input cursor, while a search
    /// term is typed.
    pub cursor: Option<usize>,
}

impl ViewState {
    /// Rows of the window starting at the current position.
    ///
    /// Lines are wrapped to `width` columns and at most `height` rows are
    /// returned. Preformatted rows are shifted left by the column offset.
    #[must_use]
    pub fn visible_rows(&self, width: usize, height: usize) -> Vec<Row> {
        let lines = self.document.lines();
        let selectable = self.selectable_indices();
        let mut ordinal = selectable.partition_point(|&i| i < self.line);
        let mut rows = Vec::new();

        for (index, line) in lines.iter().enumerate().skip(self.line) {
            if rows.len() >= height {
                break;
            }
            let mut number = None;
            if selectable.get(ordinal) == Some(&index) {
                number = Some(selector::from_index(ordinal));
                ordinal += 1;
            }
            let text = self.display_text(index);
            let matches = self.matches_in(index);
            let tag = line.style_tag();

            if !line.is_wrappable() {
                let start = byte_offset_at_column(&text, self.col_offset);
                rows.push(Row {
                    line: index,
                    row: 0,
                    text: text[start..].to_owned(),
                    tag,
                    highlights: clip_highlights(&matches, start..text.len()),
                    continuation: false,
                    indent: 0,
                    selector: number,
                });
                continue;
            }

            let skip = if index == self.line { self.line_offset } else { 0 };
            let wrap = self.wrap_at(index, width);
            for (k, range) in wrap.row_ranges(&text).enumerate().skip(skip) {
                if rows.len() >= height {
                    break;
                }
                rows.push(Row {
                    line: index,
                    row: k,
                    text: text[range.clone()].to_owned(),
                    tag,
                    highlights: clip_highlights(&matches, range),
                    continuation: k > 0,
                    indent: if k > 0 { line.indent_width() } else { 0 },
                    selector: number.take(),
                });
            }
        }
        rows
    }

    /// The status bar for a screen `width` columns wide.
    ///
    /// The left part shows the info message, else the search prompt,
    /// else the typed selector, else the document title.
    #[must_use]
    pub fn status_bar(&self, width: usize) -> StatusBar {
        let percent = format!("{}%", self.scroll_percent());
        // One blank column separates the left part from the percentage.
        let left_width = width.saturating_sub(percent.len() + 1);

        let (left, cursor) = if let Some(info) = &self.info {
            (format!("{info} "), None)
        } else if self.mode.is_searching() {
            search_prompt(
                self.mode.prompt(),
                &self.search_term,
                self.cursor,
                left_width,
            )
            .map_or_else(|| (String::new(), None), |(text, cursor)| (text, Some(cursor)))
        } else if self.selector.is_empty() {
            (format!("{} ", self.document.title().unwrap_or_default()), None)
        } else {
            (format!("{} ", self.selector), None)
        };

        let mut text = truncate_to_width(&left, left_width).to_owned();
        if cursor == Some(text.len()) {
            text.push(' ');
        }
        let pad = width
            .saturating_sub(percent.len())
            .saturating_sub(display_width(&text));
        text.extend(std::iter::repeat_n(' ', pad));
        text.push_str(&percent);
        let text = truncate_to_width(&text, width).to_owned();
        StatusBar { text, cursor }
    }
}

/// The search prompt with `term` cut down to `max_width` columns around
/// the cursor, and the byte index of the cursor within it.
///
/// Cut off parts are marked with an ellipsis. The result leaves room for
/// the cursor cell when the cursor is at the end.
fn search_prompt(
    prompt: &str,
    term: &str,
    cursor: usize,
    max_width: usize,
) -> Option<(String, usize)> {
    if max_width < MIN_PROMPT_WIDTH {
        return None;
    }
    let term_width = display_width(term);
    let mut avail = max_width.saturating_sub(display_width(prompt));
    let mut text = prompt.to_owned();

    if term_width < avail || (cursor < term.len() && term_width == avail) {
        text.push_str(term);
        return Some((text, prompt.len() + cursor));
    }
    if cursor == 0 {
        text.push_str(truncate_to_width(term, avail - 1));
        text.push_str(ELLIPSIS);
        return Some((text, prompt.len()));
    }

    text.push_str(ELLIPSIS);
    let after_ellipsis = text.len();
    avail -= 1;
    if cursor == term.len() {
        text.push_str(&term[tail_start(term, avail - 1)..]);
        let end = text.len();
        Some((text, end))
    } else if display_width(&term[cursor..]) < avail {
        let start = tail_start(term, avail);
        text.push_str(&term[start..]);
        Some((text, after_ellipsis + cursor - start))
    } else {
        text.push_str(truncate_to_width(&term[cursor..], avail - 1));
        text.push_str(ELLIPSIS);
        Some((text, after_ellipsis))
    }
}

/// Byte index where the longest tail of `text` that fits within
/// `max_width` starts. The tail starts with a visible character.
fn tail_start(text: &str, max_width: usize) -> usize {
    let mut remaining = display_width(text);
    let mut fits = false;
    for (i, c) in text.char_indices() {
        let w = display_width_char(c);
        if fits && w > 0 {
            return i;
        }
        remaining -= w;
        fits = remaining <= max_width;
    }
    text.len()
}

/// Match ranges that overlap `row`, relative to the row's start.
fn clip_highlights(matches: &[Range<usize>], row: Range<usize>) -> Vec<Range<usize>> {
    matches
        .iter()
        .filter_map(|m| {
            let start = m.start.max(row.start);
            let end = m.end.min(row.end);
            (start < end).then(|| start - row.start..end - row.start)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::view::{Mode, SelectorSpace};

    fn view(text: &str, width: usize) -> ViewState {
        ViewState::new(Document::parse(text.as_bytes()).unwrap(), width)
    }

    #[test]
    fn test_clip_highlights() {
        let matches = [0..3, 5..12, 20..22];
        assert_eq!(clip_highlights(&matches, 4..10), vec![1..6]);
        assert_eq!(clip_highlights(&matches, 10..20), vec![0..2]);
        assert!(clip_highlights(&[4..4], 0..10).is_empty());
    }

    #[test]
    fn test_rows_of_wrapped_list_are_indented() {
        let v = view("* one two three four", 10);
        let rows = v.visible_rows(10, 10);
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["* one two ", "three ", "four"]);
        assert_eq!(rows[0].indent, 0);
        assert!(rows[1].continuation);
        assert_eq!(rows[1].indent, 2);
        assert!(rows.iter().all(|r| r.tag == StyleTag::List));
    }

    #[test]
    fn test_height_limits_rows() {
        let v = view("a\nb\nc\nd", 10);
        assert_eq!(v.visible_rows(10, 2).len(), 2);
        assert!(v.visible_rows(10, 0).is_empty());
    }

    #[test]
    fn test_line_offset_skips_rows_and_keeps_selector() {
        let mut v = view("=> /x a long label for a link\nafter", 12);
        v.scroll(-1);
        let rows = v.visible_rows(12, 10);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].selector.as_deref(), Some("1"));
        assert!(rows[1..].iter().filter(|r| r.line == 0).all(|r| r.selector.is_none()));
    }

    #[test]
    fn test_selectors_count_from_document_start() {
        let text = "=> /1 one\n=> /2 two\ntext\n=> /3 three";
        let mut v = view(text, 72);
        v.scroll(-2);
        let rows = v.visible_rows(72, 10);
        assert_eq!(rows[0].selector, None);
        assert_eq!(rows[1].selector.as_deref(), Some("3"));
    }

    #[test]
    fn test_heading_space_numbers_headings() {
        let v = view("# A\n=> /x link\n## B", 72).with_selector_space(SelectorSpace::Headings);
        let rows = v.visible_rows(72, 10);
        let numbers: Vec<Option<&str>> = rows.iter().map(|r| r.selector.as_deref()).collect();
        assert_eq!(numbers, vec![Some("1"), None, Some("2")]);
    }

    #[test]
    fn test_highlights_shift_per_row() {
        let mut v = view("alpha beta gamma alpha delta", 12);
        v.set_pattern("alpha").unwrap();
        let rows = v.visible_rows(12, 10);
        assert_eq!(rows[0].highlights, vec![0..5]);
        // Second row starts at byte 11: "gamma alpha ".
        assert_eq!(rows[1].highlights, vec![6..11]);
        assert!(rows[2].highlights.is_empty());
    }

    #[test]
    fn test_match_spanning_a_break_is_split() {
        let mut v = view("alpha beta gamma", 12);
        v.set_pattern("beta gamma").unwrap();
        let rows = v.visible_rows(12, 10);
        assert_eq!(rows[0].highlights, vec![6..11]);
        assert_eq!(rows[1].highlights, vec![0..5]);
    }

    #[test]
    fn test_status_bar_shows_title_and_percent() {
        let v = view("# Blog\ntext\nmore\nend", 72);
        let bar = v.status_bar(20);
        assert_eq!(bar.text, "Blog             25%");
        assert_eq!(bar.cursor, None);
    }

    #[test]
    fn test_status_bar_priorities() {
        let mut v = view("# Blog\n=> /a a\n=> /b b\n=> /c c\n=> /d d\n=> /e e\n=> /f f\n=> /g g\n=> /h h\n=> /i i\n=> /j j", 72);
        v.append_digit(0);
        assert!(v.status_bar(12).text.starts_with("0 "));
        v.mode = Mode::Search;
        v.search_term = "ab".into();
        v.cursor = 2;
        let bar = v.status_bar(12);
        assert!(bar.text.starts_with("/ab "));
        assert_eq!(bar.cursor, Some(3));
        v.info = Some("Pattern not found.".into());
        let bar = v.status_bar(12);
        assert_eq!(bar.text, "Pattern n 9%");
        assert_eq!(bar.cursor, None);
    }

    #[test]
    fn test_status_bar_narrower_than_percent() {
        let v = view("text", 72);
        assert_eq!(v.status_bar(2).text, "10");
        assert_eq!(v.status_bar(0).text, "");
    }

    #[test]
    fn test_search_prompt_fits() {
        assert_eq!(search_prompt("/", "abc", 3, 8), Some(("/abc".into(), 4)));
        assert_eq!(search_prompt("/", "abc", 1, 8), Some(("/abc".into(), 2)));
        assert_eq!(search_prompt("/", "abc", 3, 4), None);
    }

    #[test]
    fn test_search_prompt_truncation() {
        let term = "abcdefghij";
        assert_eq!(search_prompt("/", term, 10, 8), Some(("/\u{2026}fghij".into(), 9)));
        assert_eq!(search_prompt("?", term, 0, 8), Some(("?abcdef\u{2026}".into(), 1)));
        assert_eq!(search_prompt("/", term, 7, 8), Some(("/\u{2026}efghij".into(), 7)));
        assert_eq!(search_prompt("/", term, 2, 8), Some(("/\u{2026}cdefg\u{2026}".into(), 4)));
    }

    #[test]
    fn test_tail_start_skips_zero_width() {
        assert_eq!(tail_start("abcdef", 2), 4);
        assert_eq!(tail_start("ab\u{0301}cd", 2), 4);
    }

    #[test]
    fn test_preformatted_rows_are_shifted() {
        let mut v = view("```\n0123456789abcdef\n```", 10);
        v.set_pattern("89ab").unwrap();
        v.shift_columns(4);
        let rows = v.visible_rows(10, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "456789abcdef");
        assert_eq!(rows[0].highlights, vec![4..8]);
        assert_eq!(rows[0].tag, StyleTag::Preformatted);
    }
}

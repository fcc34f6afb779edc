//! Bounded vertical and horizontal movement.

use super::ViewState;
use std::cmp::Ordering;

impl ViewState {
    /// Scroll by `rows` wrapped rows; up if positive, down if negative.
    ///
    /// Never scrolls above the first row or below the last wrapped row of
    /// the last line.
    pub fn scroll(&mut self, rows: isize) {
        let mut up = if rows > 0 { rows.unsigned_abs() } else { 0 };
        while up > 0 && (self.line > 0 || self.line_offset > 0) {
            if self.line_offset > 0 {
                self.line_offset -= 1;
            } else {
                self.line -= 1;
                self.line_offset = self.max_line_offset(self.line);
            }
            up -= 1;
        }

        let last = self.document.last_index();
        let mut down = if rows < 0 { rows.unsigned_abs() } else { 0 };
        while down > 0 {
            let max_offset = self.max_line_offset(self.line);
            if self.line_offset < max_offset {
                self.line_offset += 1;
            } else if self.line < last {
                self.line += 1;
                self.line_offset = 0;
            } else {
                break;
            }
            down -= 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.line = 0;
        self.line_offset = 0;
    }

    /// Show the last wrapped row of the last line at the top.
    pub fn scroll_to_bottom(&mut self) {
        self.line = self.document.last_index();
        self.line_offset = self.max_line_offset(self.line);
    }

    /// Jump to the next heading after the current line, if there is one.
    pub fn scroll_to_next_heading(&mut self) {
        let next = self.document.lines()[self.line + 1..]
            .iter()
            .position(|line| line.is_heading());
        if let Some(offset) = next {
            self.line += offset + 1;
            self.line_offset = 0;
        }
    }

    /// Jump to the closest heading before the current line, if there is one.
    ///
    /// When scrolled into the middle of a heading, this first returns to
    /// its start.
    pub fn scroll_to_prev_heading(&mut self) {
        if self.line_offset > 0 && self.document.lines()[self.line].is_heading() {
            self.line_offset = 0;
            return;
        }
        let prev = self.document.lines()[..self.line]
            .iter()
            .rposition(|line| line.is_heading());
        if let Some(index) = prev {
            self.line = index;
            self.line_offset = 0;
        }
    }

    /// Jump to the `n`-th heading (0-based).
    ///
    /// # Panics
    ///
    /// Panics if there are not more than `n` headings. Selector resolution
    /// guarantees the range before calling this.
    pub fn scroll_to_nth_heading(&mut self, n: usize) {
        let headings = self.document.heading_indices();
        assert!(
            n < headings.len(),
            "heading {n} requested but the document has {}",
            headings.len()
        );
        self.line = headings[n];
        self.line_offset = 0;
    }

    /// Adopt a new text width and clamp the line offset to it.
    ///
    /// Call after a resize or any other change of the wrap geometry.
    ///
    /// # Panics
    ///
    /// Panics if a non-zero line offset is set on a preformatted line,
    /// which no movement can produce.
    pub fn fix_line_offset(&mut self, width: usize) {
        self.width = width;
        self.col_offset = self.col_offset.min(self.max_col_offset());
        if self.line_offset == 0 {
            return;
        }
        assert!(
            self.document.lines()[self.line].is_wrappable(),
            "line offset {} on non-wrappable line {}",
            self.line_offset,
            self.line
        );
        self.line_offset = self.line_offset.min(self.max_line_offset(self.line));
    }

    /// Shift preformatted content horizontally by `columns`; right if
    /// positive.
    ///
    /// The shift is limited so that the widest preformatted line can just
    /// be scrolled into view.
    pub fn shift_columns(&mut self, columns: isize) {
        let shifted = if columns < 0 {
            self.col_offset.saturating_sub(columns.unsigned_abs())
        } else {
            self.col_offset.saturating_add(columns.unsigned_abs())
        };
        self.col_offset = shifted.min(self.max_col_offset());
    }

    fn max_col_offset(&self) -> usize {
        self.document.max_preformatted_width().saturating_sub(self.width)
    }

    /// Position of the first displayed line through the document, 0 to 100.
    ///
    /// Exact halves round to the even percentage.
    #[must_use]
    pub fn scroll_percent(&self) -> u8 {
        let len = self.document.len();
        let scaled = 100 * (self.line + 1);
        let (quotient, remainder) = (scaled / len, scaled % len);
        let percent = match (2 * remainder).cmp(&len) {
            Ordering::Less => quotient,
            Ordering::Greater => quotient + 1,
            Ordering::Equal => quotient + quotient % 2,
        };
        u8::try_from(percent).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use crate::view::ViewState;

    // Line 1 wraps to three rows at width 10.
    const DOC: &str = "# Top\none two three four five six\n## Middle\nshort\n### End\nlast line";

    fn view(width: usize) -> ViewState {
        ViewState::new(Document::parse(DOC.as_bytes()).unwrap(), width)
    }

    #[test]
    fn test_scroll_down_walks_wrapped_rows() {
        let mut v = view(10);
        let mut positions = Vec::new();
        for _ in 0..5 {
            v.scroll(-1);
            positions.push((v.line(), v.line_offset()));
        }
        assert_eq!(positions, vec![(1, 0), (1, 1), (1, 2), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_scroll_up_enters_line_at_last_row() {
        let mut v = view(10);
        v.scroll(-4);
        assert_eq!((v.line(), v.line_offset()), (2, 0));
        v.scroll(1);
        assert_eq!((v.line(), v.line_offset()), (1, 2));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut v = view(10);
        v.scroll(isize::MAX);
        assert_eq!((v.line(), v.line_offset()), (0, 0));
        v.scroll(isize::MIN);
        assert_eq!(v.line(), 5);
        assert_eq!(v.line_offset(), v.max_line_offset(5));
    }

    #[test]
    fn test_top_and_bottom() {
        let mut v = view(5);
        v.scroll_to_bottom();
        assert_eq!(v.line(), 5);
        // "last line" wraps to two rows at width 5.
        assert_eq!(v.line_offset(), 1);
        v.scroll_to_top();
        assert_eq!((v.line(), v.line_offset()), (0, 0));
    }

    #[test]
    fn test_heading_navigation() {
        let mut v = view(72);
        v.scroll_to_next_heading();
        assert_eq!(v.line(), 2);
        v.scroll_to_next_heading();
        assert_eq!(v.line(), 4);
        v.scroll_to_next_heading();
        assert_eq!(v.line(), 4, "no heading after the last one");
        v.scroll_to_prev_heading();
        assert_eq!(v.line(), 2);
        v.scroll_to_prev_heading();
        v.scroll_to_prev_heading();
        assert_eq!(v.line(), 0, "no heading before the first one");
    }

    #[test]
    fn test_nth_heading() {
        let mut v = view(72);
        v.scroll_to_nth_heading(2);
        assert_eq!(v.line(), 4);
        v.scroll_to_nth_heading(0);
        assert_eq!(v.line(), 0);
    }

    #[test]
    #[should_panic(expected = "heading 3 requested")]
    fn test_nth_heading_out_of_range_panics() {
        view(72).scroll_to_nth_heading(3);
    }

    #[test]
    fn test_fix_line_offset_after_widening() {
        let mut v = view(10);
        v.scroll(-3);
        assert_eq!((v.line(), v.line_offset()), (1, 2));
        v.fix_line_offset(20);
        assert_eq!(v.width(), 20);
        assert_eq!(v.line_offset(), 1);
        v.fix_line_offset(80);
        assert_eq!(v.line_offset(), 0);
    }

    #[test]
    fn test_shift_columns_is_bounded_by_preformatted_width() {
        let doc = Document::parse("```\n0123456789abcdefghij\n```\ntext".as_bytes()).unwrap();
        let mut v = ViewState::new(doc, 15);
        v.shift_columns(-3);
        assert_eq!(v.col_offset(), 0);
        v.shift_columns(4);
        assert_eq!(v.col_offset(), 4);
        v.shift_columns(100);
        assert_eq!(v.col_offset(), 5);
        v.fix_line_offset(18);
        assert_eq!(v.col_offset(), 2);
    }

    #[test]
    fn test_no_shift_without_preformatted_text() {
        let mut v = view(10);
        v.shift_columns(8);
        assert_eq!(v.col_offset(), 0);
    }

    #[test]
    fn test_scroll_percent() {
        let mut v = view(72);
        assert_eq!(v.scroll_percent(), 17);
        v.scroll_to_bottom();
        assert_eq!(v.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_percent_halves_round_to_even() {
        let doc = Document::parse("1\n2\n3\n4\n5\n6\n7\n8".as_bytes()).unwrap();
        let mut v = ViewState::new(doc, 72);
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(v.scroll_percent());
            v.scroll(-1);
        }
        assert_eq!(seen, vec![12, 25, 38, 50, 62, 75, 88, 100]);
    }
}

//! Buffered ANSI output writer with style tracking.

use crate::ansi::{self, off};
use crate::style::{Style, StyleTag, TextAttributes, Theme};
use crate::unicode::truncate_to_width;
use crate::view::{Layout, Row, StatusBar};
use std::io::{self, Write};
use std::ops::Range;

/// Buffered writer that tracks the current style to minimize escape
/// sequences.
///
/// Styles are only emitted when `styled` is set; a plain writer produces
/// the bare text, e.g. for piping into other tools.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    styled: bool,
    current: Style,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a writer that emits SGR sequences.
    pub fn new(writer: W) -> Self {
        Self::with_styles(writer, true)
    }

    /// Create a writer, emitting SGR sequences only if `styled`.
    pub fn with_styles(writer: W, styled: bool) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            styled,
            current: Style::NONE,
        }
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    fn write_spaces(&mut self, count: usize) {
        self.buffer.extend(std::iter::repeat_n(b' ', count));
    }

    /// Write document text, replacing control characters so that the
    /// content can never inject escape sequences.
    fn write_text(&mut self, s: &str) {
        if !s.chars().any(char::is_control) {
            self.write_str(s);
            return;
        }
        let cleaned: String = s
            .chars()
            .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
            .collect();
        self.write_str(&cleaned);
    }

    /// Switch to `style`, only writing the changes.
    pub fn set_style(&mut self, style: Style) {
        if !self.styled || self.current == style {
            return;
        }
        if style.is_empty() {
            self.write_str(ansi::RESET);
            self.current = Style::NONE;
            return;
        }

        let mut codes = Vec::new();
        let removed = self.current.attributes - style.attributes;
        if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
            codes.push(off::INTENSITY);
        }
        if removed.contains(TextAttributes::ITALIC) {
            codes.push(off::ITALIC);
        }
        if removed.contains(TextAttributes::UNDERLINE) {
            codes.push(off::UNDERLINE);
        }
        if removed.contains(TextAttributes::INVERSE) {
            codes.push(off::INVERSE);
        }
        // Switching intensity off clears both bold and dim.
        let kept = if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
            self.current.attributes - (TextAttributes::BOLD | TextAttributes::DIM)
        } else {
            self.current.attributes - removed
        };
        codes.extend(ansi::attribute_codes(style.attributes - kept));

        if self.current.fg != style.fg {
            codes.push(style.fg.map_or(off::FOREGROUND, |c| c.fg_code()));
        }
        // Writing into a Vec cannot fail.
        let _ = ansi::write_sgr(&mut self.buffer, &codes);
        self.current = style;
    }

    /// End the current screen line.
    pub fn end_line(&mut self) {
        self.set_style(Style::NONE);
        self.buffer.push(b'\n');
    }

    /// Write one reflowed row laid out according to `layout`.
    ///
    /// Text running past the screen edge is cut off. Highlighted ranges
    /// are drawn with the row style's inverse toggled.
    pub fn write_row(&mut self, row: &Row, layout: &Layout, theme: &Theme) {
        self.write_spaces(layout.left_space);
        if layout.selector_width > 0 {
            let number = row.selector.as_deref().unwrap_or_default();
            self.set_style(theme.style_for(StyleTag::Text));
            self.write_spaces((layout.selector_width - 1).saturating_sub(number.len()));
            self.write_str(number);
            self.write_spaces(1);
        }
        self.write_spaces(row.indent);

        let available = layout
            .screen_width()
            .saturating_sub(layout.text_start() + row.indent);
        let text = truncate_to_width(&row.text, available);
        let style = theme.style_for(row.tag);
        for (range, highlighted) in segments(text.len(), &row.highlights) {
            self.set_style(if highlighted { style.toggled_inverse() } else { style });
            self.write_text(&text[range]);
        }
        self.end_line();
    }

    /// Write the status bar in `style`, showing the cursor cell inverted.
    pub fn write_status_bar(&mut self, bar: &StatusBar, style: Style) {
        let cursor = bar
            .cursor
            .filter(|&c| c < bar.text.len())
            .map(|c| c..c + bar.text[c..].chars().next().map_or(0, char::len_utf8));
        let highlights: Vec<Range<usize>> = cursor.into_iter().collect();
        for (range, highlighted) in segments(bar.text.len(), &highlights) {
            self.set_style(if highlighted { style.toggled_inverse() } else { style });
            self.write_text(&bar.text[range]);
        }
        self.end_line();
    }

    /// Write `count` empty screen lines, e.g. below the end of a document.
    pub fn write_blank_lines(&mut self, count: usize) {
        self.set_style(Style::NONE);
        self.buffer.extend(std::iter::repeat_n(b'\n', count));
    }

    /// Flush buffered output to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.set_style(Style::NONE);
        self.flush()?;
        Ok(self.writer)
    }
}

/// Split `0..len` into runs inside and outside of `highlights`.
///
/// `highlights` must be sorted and must not overlap.
fn segments(len: usize, highlights: &[Range<usize>]) -> Vec<(Range<usize>, bool)> {
    let mut out = Vec::new();
    let mut pos = 0;
    for h in highlights {
        let start = h.start.min(len);
        let end = h.end.min(len);
        if start > pos {
            out.push((pos..start, false));
        }
        if end > start.max(pos) {
            out.push((start.max(pos)..end, true));
        }
        pos = pos.max(end);
    }
    if pos < len {
        out.push((pos..len, false));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn row(text: &str, tag: StyleTag) -> Row {
        Row {
            line: 0,
            row: 0,
            text: text.to_owned(),
            tag,
            highlights: Vec::new(),
            continuation: false,
            indent: 0,
            selector: None,
        }
    }

    fn render(f: impl FnOnce(&mut AnsiWriter<Vec<u8>>)) -> String {
        let mut w = AnsiWriter::new(Vec::new());
        f(&mut w);
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments(5, &[]), vec![(0..5, false)]);
        assert_eq!(
            segments(10, &[2..4, 6..12]),
            vec![(0..2, false), (2..4, true), (4..6, false), (6..10, true)]
        );
        assert!(segments(0, &[]).is_empty());
    }

    #[test]
    fn test_style_delta() {
        let out = render(|w| {
            w.set_style(Style::bold());
            w.set_style(Style::bold());
            w.set_style(Style::bold().with_attributes(TextAttributes::ITALIC));
            w.set_style(Style::italic());
            w.set_style(Style::fg(Color::Blue));
        });
        assert_eq!(out, "\x1b[1m\x1b[3m\x1b[22m\x1b[23;34m\x1b[0m");
    }

    #[test]
    fn test_unstyled_writer_emits_text_only() {
        let mut w = AnsiWriter::with_styles(Vec::new(), false);
        let layout = Layout::new(20, 1, 72);
        let mut r = row("=> a (/x)", StyleTag::Link);
        r.selector = Some("1".into());
        w.write_row(&r, &layout, &Theme::default());
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "1 => a (/x)\n");
    }

    #[test]
    fn test_row_with_highlight_and_indent() {
        let layout = Layout::new(20, 0, 72);
        let mut r = row("gamma alpha", StyleTag::Text);
        r.highlights = vec![6..11];
        r.indent = 2;
        let out = render(|w| w.write_row(&r, &layout, &Theme::default()));
        assert_eq!(out, "  gamma \x1b[7malpha\x1b[0m\n");
    }

    #[test]
    fn test_row_is_cut_at_screen_edge() {
        let mut w = AnsiWriter::with_styles(Vec::new(), false);
        let layout = Layout::new(10, 0, 72);
        w.write_row(&row("0123456789abcdef", StyleTag::Preformatted), &layout, &Theme::default());
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "0123456789\n");
    }

    #[test]
    fn test_control_characters_are_replaced() {
        let mut w = AnsiWriter::with_styles(Vec::new(), false);
        let layout = Layout::new(20, 0, 72);
        w.write_row(&row("a\x1b[2Jb", StyleTag::Text), &layout, &Theme::default());
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "a\u{FFFD}[2Jb\n");
    }

    #[test]
    fn test_status_bar_cursor() {
        let bar = StatusBar {
            text: "/ab  9%".into(),
            cursor: Some(3),
        };
        let out = render(|w| w.write_status_bar(&bar, Style::inverse()));
        assert_eq!(out, "\x1b[7m/ab\x1b[0m \x1b[7m 9%\x1b[0m\n");
    }
}

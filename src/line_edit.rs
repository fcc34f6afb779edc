//! Single-line input with history, used for search terms.

use crate::input::{KeyCode, KeyEvent};
use crate::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Outcome of feeding one key to a [`LineEditor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditStatus {
    /// Input continues.
    Reading,
    /// The line was submitted.
    Done(String),
    /// Input was abandoned.
    Aborted,
}

/// A line being typed, with a cursor and a history of submitted lines.
#[derive(Clone, Debug, Default)]
pub struct LineEditor {
    line: String,
    /// Byte index of the cursor; always on a grapheme boundary.
    cursor: usize,
    history: Vec<String>,
    /// Entry shown while walking the history.
    browsing: Option<usize>,
    /// The line as typed before walking the history.
    draft: String,
}

impl LineEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.line
    }

    /// Byte index of the cursor within [`input`](Self::input).
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Submitted lines, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply one key press.
    ///
    /// `Done` and `Aborted` leave the editor empty and ready for the
    /// next line.
    pub fn process_key(&mut self, key: &KeyEvent) -> EditStatus {
        if key.is_ctrl_c() {
            self.reset();
            return EditStatus::Aborted;
        }
        if key.ctrl() {
            match key.code {
                KeyCode::Char('a') => self.cursor = 0,
                KeyCode::Char('e') => self.cursor = self.line.len(),
                KeyCode::Char('u') => {
                    self.line.drain(..self.cursor);
                    self.cursor = 0;
                }
                _ => {}
            }
            return EditStatus::Reading;
        }

        match key.code {
            KeyCode::Left => self.cursor = prev_grapheme_boundary(&self.line, self.cursor),
            KeyCode::Right => self.cursor = next_grapheme_boundary(&self.line, self.cursor),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.line.len(),
            KeyCode::Backspace => {
                let start = prev_grapheme_boundary(&self.line, self.cursor);
                self.line.drain(start..self.cursor);
                self.cursor = start;
            }
            KeyCode::Delete => {
                let end = next_grapheme_boundary(&self.line, self.cursor);
                self.line.drain(self.cursor..end);
            }
            KeyCode::Up => self.history_back(),
            KeyCode::Down => self.history_forward(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => {
                self.reset();
                return EditStatus::Aborted;
            }
            KeyCode::Char(c) => {
                self.line.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                // Keep the cursor off the inside of a cluster.
                let cluster_start = prev_grapheme_boundary(&self.line, self.cursor);
                let cluster_end = next_grapheme_boundary(&self.line, cluster_start);
                if cluster_end > self.cursor {
                    self.cursor = cluster_end;
                }
            }
            KeyCode::PageUp | KeyCode::PageDown => {}
        }
        EditStatus::Reading
    }

    fn submit(&mut self) -> EditStatus {
        let line = std::mem::take(&mut self.line);
        self.reset();
        if line.is_empty() {
            return match self.history.last() {
                Some(last) => EditStatus::Done(last.clone()),
                None => EditStatus::Aborted,
            };
        }
        if self.history.last() != Some(&line) {
            self.history.push(line.clone());
        }
        EditStatus::Done(line)
    }

    fn history_back(&mut self) {
        let index = match self.browsing {
            None if self.history.is_empty() => return,
            None => {
                self.draft = std::mem::take(&mut self.line);
                self.history.len() - 1
            }
            Some(i) => i.saturating_sub(1),
        };
        self.show_history(Some(index));
    }

    fn history_forward(&mut self) {
        match self.browsing {
            Some(i) if i + 1 < self.history.len() => self.show_history(Some(i + 1)),
            Some(_) => self.show_history(None),
            None => {}
        }
    }

    fn show_history(&mut self, index: Option<usize>) {
        self.browsing = index;
        self.line = match index {
            Some(i) => self.history[i].clone(),
            None => std::mem::take(&mut self.draft),
        };
        self.cursor = self.line.len();
    }

    fn reset(&mut self) {
        self.line.clear();
        self.cursor = 0;
        self.browsing = None;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            assert_eq!(editor.process_key(&KeyEvent::char(c)), EditStatus::Reading);
        }
    }

    fn press(editor: &mut LineEditor, code: KeyCode) -> EditStatus {
        editor.process_key(&KeyEvent::key(code))
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut e = LineEditor::new();
        type_str(&mut e, "héllo");
        assert_eq!(e.input(), "héllo");
        assert_eq!(e.cursor(), 6);
        assert_eq!(press(&mut e, KeyCode::Enter), EditStatus::Done("héllo".into()));
        assert_eq!(e.input(), "");
        assert_eq!(e.history(), ["héllo"]);
    }

    #[test]
    fn test_cursor_moves_by_grapheme() {
        let mut e = LineEditor::new();
        type_str(&mut e, "ae\u{0301}b");
        press(&mut e, KeyCode::Left);
        assert_eq!(e.cursor(), 4);
        press(&mut e, KeyCode::Left);
        assert_eq!(e.cursor(), 1);
        press(&mut e, KeyCode::Delete);
        assert_eq!(e.input(), "ab");
        press(&mut e, KeyCode::Home);
        press(&mut e, KeyCode::Right);
        type_str(&mut e, "x");
        assert_eq!(e.input(), "axb");
    }

    #[test]
    fn test_backspace() {
        let mut e = LineEditor::new();
        type_str(&mut e, "日本");
        press(&mut e, KeyCode::Backspace);
        assert_eq!(e.input(), "日");
        press(&mut e, KeyCode::Home);
        press(&mut e, KeyCode::Backspace);
        assert_eq!(e.input(), "日");
    }

    #[test]
    fn test_abort_clears_input() {
        let mut e = LineEditor::new();
        type_str(&mut e, "abc");
        assert_eq!(press(&mut e, KeyCode::Esc), EditStatus::Aborted);
        assert_eq!(e.input(), "");
        type_str(&mut e, "abc");
        let ctrl_c = KeyEvent::with_ctrl(KeyCode::Char('c'));
        assert_eq!(e.process_key(&ctrl_c), EditStatus::Aborted);
        assert!(e.history().is_empty());
    }

    #[test]
    fn test_empty_enter_repeats_last_entry() {
        let mut e = LineEditor::new();
        assert_eq!(press(&mut e, KeyCode::Enter), EditStatus::Aborted);
        type_str(&mut e, "one");
        press(&mut e, KeyCode::Enter);
        assert_eq!(press(&mut e, KeyCode::Enter), EditStatus::Done("one".into()));
        assert_eq!(e.history().len(), 1);
    }

    #[test]
    fn test_history_walk() {
        let mut e = LineEditor::new();
        for term in ["one", "two"] {
            type_str(&mut e, term);
            press(&mut e, KeyCode::Enter);
        }
        type_str(&mut e, "dr");
        press(&mut e, KeyCode::Up);
        assert_eq!(e.input(), "two");
        press(&mut e, KeyCode::Up);
        press(&mut e, KeyCode::Up);
        assert_eq!(e.input(), "one");
        assert_eq!(e.cursor(), 3);
        press(&mut e, KeyCode::Down);
        assert_eq!(e.input(), "two");
        press(&mut e, KeyCode::Down);
        assert_eq!(e.input(), "dr", "walking past the newest entry restores the draft");
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut e = LineEditor::new();
        type_str(&mut e, "abcd");
        e.process_key(&KeyEvent::with_ctrl(KeyCode::Char('a')));
        assert_eq!(e.cursor(), 0);
        e.process_key(&KeyEvent::with_ctrl(KeyCode::Char('e')));
        press(&mut e, KeyCode::Left);
        e.process_key(&KeyEvent::with_ctrl(KeyCode::Char('u')));
        assert_eq!(e.input(), "d");
        assert_eq!(e.cursor(), 0);
    }
}

//! Single-line command editor.
//!
//! Cursor positions are char indices, never byte offsets.

use crate::map::InputEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Apply one event. Returns the submitted line on `Submit`, leaving the
    /// editor empty.
    pub fn apply(&mut self, event: InputEvent) -> Option<String> {
        match event {
            InputEvent::Insert(c) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            InputEvent::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            InputEvent::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            InputEvent::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEvent::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            InputEvent::Home => self.cursor = 0,
            InputEvent::End => self.cursor = self.chars.len(),
            InputEvent::Kill => {
                self.chars.clear();
                self.cursor = 0;
            }
            InputEvent::Submit => {
                let line = self.text();
                self.chars.clear();
                self.cursor = 0;
                return Some(line);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            editor.apply(InputEvent::Insert(c));
        }
    }

    #[test]
    fn submit_returns_line_and_clears() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "glitch");
        assert_eq!(ed.apply(InputEvent::Submit), Some("glitch".to_string()));
        assert!(ed.is_empty());
        assert_eq!(ed.cursor(), 0);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "bx");
        ed.apply(InputEvent::Left);
        ed.apply(InputEvent::Insert('o'));
        assert_eq!(ed.text(), "box");
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut ed = LineEditor::new();
        ed.apply(InputEvent::Backspace);
        ed.apply(InputEvent::Delete);
        type_str(&mut ed, "héllo");
        ed.apply(InputEvent::Home);
        ed.apply(InputEvent::Delete);
        ed.apply(InputEvent::End);
        ed.apply(InputEvent::Backspace);
        assert_eq!(ed.text(), "éll");
        ed.apply(InputEvent::Right);
        assert_eq!(ed.cursor(), 3);
    }

    #[test]
    fn kill_drops_everything() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "countdown");
        ed.apply(InputEvent::Kill);
        assert!(ed.is_empty());
        assert_eq!(ed.apply(InputEvent::Submit), Some(String::new()));
    }
}

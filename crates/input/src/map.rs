//! Key mapping from terminal events to line-editing events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Drop the whole line (Ctrl-U).
    Kill,
    Submit,
}

/// Map keyboard input to editor events.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Delete => Some(InputEvent::Delete),
        KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Right => Some(InputEvent::Right),
        KeyCode::Home => Some(InputEvent::Home),
        KeyCode::End => Some(InputEvent::End),

        // Emacs-style line motions.
        KeyCode::Char('a') | KeyCode::Char('A') if ctrl => Some(InputEvent::Home),
        KeyCode::Char('e') | KeyCode::Char('E') if ctrl => Some(InputEvent::End),
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => Some(InputEvent::Kill),
        KeyCode::Char(_) if ctrl => None,

        KeyCode::Char(c) => Some(InputEvent::Insert(c)),
        _ => None,
    }
}

/// Check if key should quit the playground (Esc or Ctrl-C).
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_printable_keys_insert() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('g'))),
            Some(InputEvent::Insert('g'))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(InputEvent::Insert('G'))
        );
        // 'q' is a normal character here; typing "sequence" must not quit.
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(InputEvent::Insert('q'))
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(InputEvent::Submit));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Backspace)),
            Some(InputEvent::Backspace)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Home)), Some(InputEvent::Home));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(InputEvent::Kill)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(1))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}

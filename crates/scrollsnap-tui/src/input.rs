use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scrollsnap_core::snap::Key;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Arrow-key style navigation, routed through the snap controller
    Snap(Key),
    /// Jump straight to a section (clamped to the last one)
    JumpTo(usize),
    JumpToNearest,
    TogglePause,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Section navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Action::Snap(Key::Up),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Action::Snap(Key::Down),

        // Direct jumps
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpTo(0),
        (KeyCode::Char('G'), _) => Action::JumpTo(usize::MAX),
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpTo(c as usize - '1' as usize)
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::JumpToNearest,

        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePause,

        (KeyCode::Char(_), _) | (KeyCode::PageUp, _) | (KeyCode::PageDown, _) => {
            Action::Snap(Key::Other)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_vim_keys() {
        assert_eq!(handle_key_event(press(KeyCode::Up)), Action::Snap(Key::Up));
        assert_eq!(handle_key_event(press(KeyCode::Char('j'))), Action::Snap(Key::Down));
    }

    #[test]
    fn test_digit_jumps_are_zero_based() {
        assert_eq!(handle_key_event(press(KeyCode::Char('1'))), Action::JumpTo(0));
        assert_eq!(handle_key_event(press(KeyCode::Char('9'))), Action::JumpTo(8));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::JumpTo(usize::MAX)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(handle_key_event(press(KeyCode::Char('x'))), Action::Snap(Key::Other));
        assert_eq!(handle_key_event(press(KeyCode::F(5))), Action::None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }
}

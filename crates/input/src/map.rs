//! Key mapping from terminal events to input events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tetrohash_types::Command;

/// One decoded input: either an engine command or the app-level puzzle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Engine(Command),
    /// Ask the puzzle collaborator whether the current piece's label solves
    /// the active target hash.
    CheckPuzzle,
}

/// Map keyboard input to an input event. Unrecognized keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Engine(Command::Quit));
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::Engine(Command::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::Engine(Command::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputEvent::Engine(Command::SoftDrop))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::CheckPuzzle),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            Some(InputEvent::Engine(Command::Quit))
        }
        _ => None,
    }
}

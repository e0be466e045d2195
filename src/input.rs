use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::arena::Direction;

/// What a key means while a round is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

impl Command {
    /// Maps vim keys and arrows to moves; `q`, Esc and ctrl+c to quit.
    /// Anything else, including key releases, maps to `None`.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if is_quit(key) {
            return Some(Command::Quit);
        }

        let direction = match key.code {
            KeyCode::Char('h') | KeyCode::Left => Direction::Left,
            KeyCode::Char('j') | KeyCode::Down => Direction::Down,
            KeyCode::Char('k') | KeyCode::Up => Direction::Up,
            KeyCode::Char('l') | KeyCode::Right => Direction::Right,
            _ => return None,
        };

        Some(Command::Move(direction))
    }
}

/// Answer to the game-over prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PromptChoice {
    Replay,
    Quit,
}

impl PromptChoice {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if is_quit(key) {
            return Some(PromptChoice::Quit);
        }

        match key.code {
            KeyCode::Char('p') => Some(PromptChoice::Replay),
            _ => None,
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, HeldAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Map a key press to a discrete game action.
///
/// Down has no discrete action; soft drop is read from the held state only.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::RotateCw),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(GameAction::RotateCcw)
        }
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate180),

        // Actions; bare Shift only arrives under keyboard enhancement
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift)
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Keys whose held state feeds auto-shift and soft drop.
pub fn held_action(code: KeyCode) -> Option<HeldAction> {
    match code {
        KeyCode::Left => Some(HeldAction::MoveLeft),
        KeyCode::Right => Some(HeldAction::MoveRight),
        KeyCode::Down => Some(HeldAction::SoftDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

//! Terminal input mapping.
//!
//! Translates crossterm key and mouse events into game actions. Kept free of
//! I/O so the bindings can be tested directly.

use crate::game::FlappyInput;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// What the main loop should do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(FlappyInput),
    Quit,
    None,
}

/// Map a key press. `game_over` switches Enter from flap to restart.
pub fn map_key(key: KeyEvent, game_over: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Enter if game_over => Action::Game(FlappyInput::Restart),
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Game(FlappyInput::Restart),
        KeyCode::Char(' ') | KeyCode::Char('k') | KeyCode::Up | KeyCode::Enter => {
            Action::Game(FlappyInput::Flap)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Action::Game(FlappyInput::TogglePause),
        _ => Action::Game(FlappyInput::Other),
    }
}

/// Map a mouse event. A left click is a tap, or presses Restart when the
/// run is over and the click lands on the button.
pub fn map_mouse(mouse: MouseEvent, restart_button: Rect, game_over: bool) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::None;
    }

    if game_over {
        if contains(restart_button, mouse.column, mouse.row) {
            Action::Game(FlappyInput::Restart)
        } else {
            Action::None
        }
    } else {
        Action::Game(FlappyInput::Flap)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

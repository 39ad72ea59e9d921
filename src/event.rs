//! Keyboard event handling.
//!
//! Vim-style navigation over the alignment columns:
//! - `h`/`l` or arrows: move left/right
//! - `0` or `Home`: go to first column
//! - `$` or `End`: go to last column
//! - `n`/`N`: next/previous mismatch or gap
//! - `PageUp`/`PageDown`: scroll one screen
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the viewer
//!   - `:<number>`: go to column

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the viewer
    Quit,
    /// Move cursor left
    MoveLeft,
    /// Move cursor right
    MoveRight,
    /// Scroll one screen left (PageUp)
    PageLeft,
    /// Scroll one screen right (PageDown)
    PageRight,
    /// Go to first column (0 or Home)
    GotoFirstColumn,
    /// Go to last column ($ or End)
    GotoLastColumn,
    /// Jump to the next mismatch or gap (n)
    NextDifference,
    /// Jump to the previous mismatch or gap (N)
    PreviousDifference,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, mode: &AppMode) -> Action {
    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode.
fn handle_normal_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,

        KeyCode::Char('0') | KeyCode::Home => Action::GotoFirstColumn,
        KeyCode::Char('$') | KeyCode::End => Action::GotoLastColumn,

        KeyCode::PageUp => Action::PageLeft,
        KeyCode::PageDown => Action::PageRight,

        KeyCode::Char('n') => Action::NextDifference,
        KeyCode::Char('N') => Action::PreviousDifference,

        KeyCode::Char(':') => Action::EnterCommandMode,

        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the viewer should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => state.should_quit = true,
        Action::MoveLeft => state.move_left(),
        Action::MoveRight => state.move_right(),
        Action::PageLeft => state.page_left(),
        Action::PageRight => state.page_right(),
        Action::GotoFirstColumn => state.goto_first_column(),
        Action::GotoLastColumn => state.goto_last_column(),
        Action::NextDifference => state.next_difference(),
        Action::PreviousDifference => state.previous_difference(),
        Action::EnterCommandMode => state.enter_command_mode(),
        Action::CommandChar(c) => state.command_input(c),
        Action::ExecuteCommand => state.execute_command(),
        Action::CancelCommand => state.cancel_command(),
        Action::CommandBackspace => state.command_backspace(),
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use crate::model::AlignedTriple;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_navigation() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), &mode), Action::MoveLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), &mode), Action::MoveRight);
        assert_eq!(handle_key_event(key(KeyCode::Left), &mode), Action::MoveLeft);
        assert_eq!(handle_key_event(key(KeyCode::Right), &mode), Action::MoveRight);
        assert_eq!(handle_key_event(key(KeyCode::Char('0')), &mode), Action::GotoFirstColumn);
        assert_eq!(handle_key_event(key(KeyCode::End), &mode), Action::GotoLastColumn);
        assert_eq!(handle_key_event(key(KeyCode::PageDown), &mode), Action::PageRight);
    }

    #[test]
    fn test_difference_keys() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &mode), Action::NextDifference);
        assert_eq!(handle_key_event(key(KeyCode::Char('N')), &mode), Action::PreviousDifference);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode), Action::CommandChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode), Action::ExecuteCommand);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode), Action::CancelCommand);
        assert_eq!(handle_key_event(key(KeyCode::Backspace), &mode), Action::CommandBackspace);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(event, &AppMode::Normal), Action::Quit);
    }

    #[test]
    fn test_apply_quit_command() {
        let triple = AlignedTriple::from_rows("MKT", "MKV").unwrap();
        let layout = build_layout(&triple, "Sequence_1", "Sequence_2");
        let mut state = AppState::new(layout, None);

        assert!(apply_action(&mut state, Action::EnterCommandMode));
        assert!(apply_action(&mut state, Action::CommandChar('q')));
        assert!(!apply_action(&mut state, Action::ExecuteCommand));
    }
}

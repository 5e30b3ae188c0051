//! Event handling for the ratatui TUI
//!
//! Routes keyboard and mouse events to the state methods of the current mode.

use super::state::{AppState, Mode};
use crate::session::ApplyRequest;
use crate::text::EditCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Lines scrolled by `PgUp`/`PgDn` in the response pane
const RESPONSE_PAGE: isize = 10;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Exit the application
    Quit,
    /// Evaluate a query in the background
    Dispatch(ApplyRequest),
    /// No action taken
    Ignored,
}

/// Map a key onto a line editing command
///
/// Printable ASCII inserts; Ctrl+W deletes a word back; Ctrl+Left/Right jump
/// between word boundaries.
#[must_use]
pub fn edit_command(key: KeyEvent) -> Option<EditCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => Some(EditCommand::DeleteWordBack),
        KeyCode::Char(c)
            if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) && (' '..='~').contains(&c) =>
        {
            Some(EditCommand::Insert(c))
        }
        KeyCode::Backspace => Some(EditCommand::Backspace),
        KeyCode::Delete => Some(EditCommand::Delete),
        KeyCode::Left if ctrl => Some(EditCommand::WordLeft),
        KeyCode::Right if ctrl => Some(EditCommand::WordRight),
        KeyCode::Left => Some(EditCommand::CursorLeft),
        KeyCode::Right => Some(EditCommand::CursorRight),
        KeyCode::Home => Some(EditCommand::Home),
        KeyCode::End => Some(EditCommand::End),
        _ => None,
    }
}

/// Handle events in normal mode
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.quit();
            EventResult::Quit
        }

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }
        (KeyCode::Enter | KeyCode::Char(' '), _) => {
            state.activate();
            EventResult::Continue
        }

        // Filters
        (KeyCode::Char('/'), _) => {
            state.start_tree_filter();
            EventResult::Continue
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            state.start_query_filter();
            EventResult::Continue
        }
        (KeyCode::Esc, _) => {
            state.clear_filters();
            EventResult::Continue
        }

        // Response scroll
        (KeyCode::PageUp, _) => {
            state.scroll_response(-RESPONSE_PAGE);
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.scroll_response(RESPONSE_PAGE);
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle events while typing into the tree filter
fn handle_tree_filter_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.quit();
            EventResult::Quit
        }
        (KeyCode::Enter, _) => {
            state.tree_filter_commit();
            EventResult::Continue
        }
        (KeyCode::Esc, _) => {
            state.tree_filter_exit();
            EventResult::Continue
        }
        (KeyCode::Up, _) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => match edit_command(key) {
            Some(command) => {
                state.tree_filter_edit(command);
                EventResult::Continue
            }
            None => EventResult::Ignored,
        },
    }
}

/// Handle events in the query filter modal
fn handle_query_filter_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.quit();
            EventResult::Quit
        }
        (KeyCode::Enter, _) => EventResult::Dispatch(state.query_filter_submit()),
        (KeyCode::Esc, _) => {
            state.query_filter_exit();
            EventResult::Continue
        }
        (KeyCode::Up, _) => {
            state.sessions.query_mut().suggestion_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.sessions.query_mut().suggestion_down();
            EventResult::Continue
        }
        (KeyCode::Tab, _) => {
            if state.sessions.query_mut().accept_suggestion() {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        _ => match edit_command(key) {
            Some(command) => {
                state.sessions.query_mut().edit(command);
                EventResult::Continue
            }
            None => EventResult::Ignored,
        },
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> EventResult {
    if state.mode != Mode::Normal {
        return EventResult::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Route a key to the handler of the current mode
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    match state.mode {
        Mode::Normal => handle_normal_mode(state, key),
        Mode::TreeFilter => handle_tree_filter_mode(state, key),
        Mode::QueryFilter => handle_query_filter_mode(state, key),
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}

//! Mapping of raw terminal input to app actions.
//!
//! Only a plain Enter submits. Everything else either edits the draft,
//! scrolls the transcript, toggles help, or quits.

use crate::core::app::AppAction;
use crate::ui::layout::{hit, ChatLayout};
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

const WHEEL_SCROLL_LINES: u16 = 3;

pub fn action_for_key(key: &KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(AppAction::Quit),
        KeyCode::Esc => Some(AppAction::Quit),
        KeyCode::Enter if key.modifiers.is_empty() => Some(AppAction::SubmitDraft),
        KeyCode::F(1) => Some(AppAction::ToggleHelp),
        KeyCode::Up => Some(AppAction::ScrollUp { lines: 1 }),
        KeyCode::Down => Some(AppAction::ScrollDown { lines: 1 }),
        KeyCode::PageUp => Some(AppAction::PageUp),
        KeyCode::PageDown => Some(AppAction::PageDown),
        KeyCode::Left => Some(AppAction::MoveCursorLeft),
        KeyCode::Right => Some(AppAction::MoveCursorRight),
        KeyCode::Home => Some(AppAction::MoveCursorToStart),
        KeyCode::End => Some(AppAction::MoveCursorToEnd),
        KeyCode::Backspace => Some(AppAction::DeleteBackward),
        KeyCode::Delete => Some(AppAction::DeleteForward),
        KeyCode::Char(ch) if !ctrl && !alt => Some(AppAction::InsertIntoInput {
            text: ch.to_string(),
        }),
        _ => None,
    }
}

/// Clicks on the header button and the send button, plus wheel scrolling.
/// The send button is inert while `can_submit` is false.
pub fn action_for_mouse(
    event: &MouseEvent,
    layout: &ChatLayout,
    can_submit: bool,
) -> Option<AppAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if hit(layout.help_button, event.column, event.row) {
                Some(AppAction::ToggleHelp)
            } else if can_submit && hit(layout.send_button, event.column, event.row) {
                Some(AppAction::SubmitDraft)
            } else {
                None
            }
        }
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp {
            lines: WHEEL_SCROLL_LINES,
        }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown {
            lines: WHEEL_SCROLL_LINES,
        }),
        _ => None,
    }
}

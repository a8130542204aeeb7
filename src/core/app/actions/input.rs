use super::{App, AppAction, AppCommand};

/// Draft edits. These stay live while a request is in flight so the next
/// question can be typed.
pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::InsertIntoInput { text } => {
            if !text.is_empty() {
                app.ui.insert_into_input(&text);
            }
        }
        AppAction::DeleteBackward => app.ui.delete_backward(),
        AppAction::DeleteForward => app.ui.delete_forward(),
        AppAction::MoveCursorLeft => app.ui.move_cursor_left(),
        AppAction::MoveCursorRight => app.ui.move_cursor_right(),
        AppAction::MoveCursorToStart => app.ui.move_cursor_to_start(),
        AppAction::MoveCursorToEnd => app.ui.move_cursor_to_end(),
        _ => unreachable!("non-input action routed to input handler"),
    }
    None
}

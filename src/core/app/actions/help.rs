use tracing::debug;

use super::{App, AppAction, AppActionContext, AppCommand};

pub(super) fn handle_help_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    let command = match action {
        AppAction::ToggleHelp => app
            .ui
            .help
            .toggle()
            .map(|generation| AppCommand::LoadHelp { generation }),
        AppAction::HelpLoaded {
            generation,
            content,
        } => {
            if !app.ui.help.finish_load(generation, content) {
                debug!(generation, "discarding help content for a hidden panel");
            }
            None
        }
        _ => unreachable!("non-help action routed to help handler"),
    };

    // The panel resizes the transcript either way
    let mut conversation = app.conversation();
    let available = conversation.calculate_available_height(ctx.term_width, ctx.term_height);
    conversation.update_scroll_position(available, ctx.term_width);

    command
}

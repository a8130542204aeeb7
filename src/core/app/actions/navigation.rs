use super::{App, AppAction, AppActionContext, AppCommand};

pub(super) fn handle_navigation_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    let available = app.ui.transcript_height(ctx.term_width, ctx.term_height);
    match action {
        AppAction::ScrollUp { lines } => app.ui.scroll_up(lines),
        AppAction::ScrollDown { lines } => app.ui.scroll_down(lines, available, ctx.term_width),
        AppAction::PageUp => app.ui.page_up(available),
        AppAction::PageDown => app.ui.page_down(available, ctx.term_width),
        AppAction::Quit => app.ui.exit_requested = true,
        _ => unreachable!("non-navigation action routed to navigation handler"),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::utils::test_utils::create_test_app;

    fn default_ctx() -> AppActionContext {
        AppActionContext {
            term_width: 80,
            term_height: 24,
        }
    }

    #[test]
    fn scrolling_moves_within_bounds() {
        let mut app = create_test_app();
        for i in 0..40 {
            app.ui.messages.push_back(Message::bot(format!("entry {i}")));
        }
        let ctx = default_ctx();
        // 80 lines of transcript in a 20 line viewport
        app.ui.scroll_to_bottom_view(20, 80);
        assert_eq!(app.ui.scroll_offset, 60);

        handle_navigation_action(&mut app, AppAction::ScrollUp { lines: 1 }, ctx);
        assert_eq!(app.ui.scroll_offset, 59);
        assert!(!app.ui.auto_scroll);

        handle_navigation_action(&mut app, AppAction::PageUp, ctx);
        assert_eq!(app.ui.scroll_offset, 40);

        handle_navigation_action(&mut app, AppAction::ScrollDown { lines: 100 }, ctx);
        assert_eq!(app.ui.scroll_offset, 60);
        assert!(app.ui.auto_scroll);

        handle_navigation_action(&mut app, AppAction::ScrollUp { lines: 100 }, ctx);
        assert_eq!(app.ui.scroll_offset, 0);
    }

    #[test]
    fn quit_requests_exit() {
        let mut app = create_test_app();
        assert!(handle_navigation_action(&mut app, AppAction::Quit, default_ctx()).is_none());
        assert!(app.ui.exit_requested);
    }
}

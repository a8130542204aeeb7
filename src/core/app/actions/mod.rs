mod help;
mod input;
mod navigation;
mod submit;

use tokio::sync::mpsc;

use super::App;
use crate::core::chat_request::{Reply, RequestParams};
use crate::core::help::HelpContent;

pub enum AppAction {
    /// Send the current draft. Ignored when blank or while a request is in flight.
    SubmitDraft,
    ReplyReceived {
        reply: Reply,
        request_id: u64,
    },
    InsertIntoInput {
        text: String,
    },
    DeleteBackward,
    DeleteForward,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorToStart,
    MoveCursorToEnd,
    ToggleHelp,
    HelpLoaded {
        generation: u64,
        content: HelpContent,
    },
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    PageUp,
    PageDown,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects the event loop runs outside the state lock.
pub enum AppCommand {
    SendQuery(RequestParams),
    LoadHelp { generation: u64 },
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::SubmitDraft | AppAction::ReplyReceived { .. } => {
            submit::handle_submit_action(app, action, ctx)
        }

        AppAction::InsertIntoInput { .. }
        | AppAction::DeleteBackward
        | AppAction::DeleteForward
        | AppAction::MoveCursorLeft
        | AppAction::MoveCursorRight
        | AppAction::MoveCursorToStart
        | AppAction::MoveCursorToEnd => input::handle_input_action(app, action),

        AppAction::ToggleHelp | AppAction::HelpLoaded { .. } => {
            help::handle_help_action(app, action, ctx)
        }

        AppAction::ScrollUp { .. }
        | AppAction::ScrollDown { .. }
        | AppAction::PageUp
        | AppAction::PageDown
        | AppAction::Quit => navigation::handle_navigation_action(app, action, ctx),
    }
}

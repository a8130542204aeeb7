use crate::core::config::Config;

pub mod actions;
pub mod conversation;
pub mod session;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use conversation::ConversationController;
pub use session::{SessionBootstrap, SessionContext};
pub use ui_state::UiState;

/// Everything the chat screen owns: the backend session and the UI state.
pub struct App {
    pub session: SessionContext,
    pub ui: UiState,
}

impl App {
    pub fn from_bootstrap(bootstrap: SessionBootstrap) -> Self {
        let SessionBootstrap {
            session,
            theme,
            title,
        } = bootstrap;
        Self {
            session,
            ui: UiState::new_basic(theme, title),
        }
    }

    pub fn new(config: &Config, cli_endpoint: Option<&str>, env_endpoint: Option<&str>) -> Self {
        Self::from_bootstrap(session::prepare(config, cli_endpoint, env_endpoint))
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.ui)
    }
}

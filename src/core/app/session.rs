use reqwest::Client;

use crate::core::config::Config;
use crate::ui::theme::Theme;

/// Backend connection state for one run of the client.
pub struct SessionContext {
    pub client: Client,
    /// Full URL the chat query is posted to.
    pub endpoint: String,
    /// Id of the most recently issued request. Replies carrying any other id
    /// are stale and dropped.
    pub current_request_id: u64,
}

impl SessionContext {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            current_request_id: 0,
        }
    }

    pub fn next_request_id(&mut self) -> u64 {
        self.current_request_id = self.current_request_id.wrapping_add(1);
        self.current_request_id
    }

    pub fn is_current_request(&self, request_id: u64) -> bool {
        request_id == self.current_request_id
    }
}

pub struct SessionBootstrap {
    pub session: SessionContext,
    pub theme: Theme,
    pub title: String,
}

/// Resolve everything the app needs from config plus command-line and
/// environment overrides.
pub fn prepare(config: &Config, cli_endpoint: Option<&str>, env_endpoint: Option<&str>) -> SessionBootstrap {
    let endpoint = config.resolve_endpoint(cli_endpoint, env_endpoint);
    let theme = config
        .theme
        .as_deref()
        .map(Theme::from_name)
        .unwrap_or_else(Theme::dark_default);

    SessionBootstrap {
        session: SessionContext::new(endpoint),
        theme,
        title: config.title().to_string(),
    }
}

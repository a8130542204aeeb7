use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::utils::url::construct_api_url;

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Path of the chat route below the base URL.
pub const DEFAULT_CHAT_PATH: &str = "chat";
pub const DEFAULT_TITLE: &str = "Parley";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "PARLEY_ENDPOINT";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme and authority of the backend, e.g. "http://localhost:8080"
    pub base_url: Option<String>,
    /// Route appended to `base_url`, e.g. "chat"
    pub chat_path: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Text shown in the header bar
    pub title: Option<String>,
}

/// Keys accepted by `parley set` / `parley unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    ChatPath,
    Theme,
    Title,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::BaseUrl,
        ConfigKey::ChatPath,
        ConfigKey::Theme,
        ConfigKey::Title,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::ChatPath => "chat-path",
            ConfigKey::Theme => "theme",
            ConfigKey::Title => "title",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| {
                let known: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "Unknown config key: {value} (expected one of: {})",
                    known.join(", ")
                )
            })
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn chat_path(&self) -> &str {
        self.chat_path.as_deref().unwrap_or(DEFAULT_CHAT_PATH)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Endpoint built from the configured (or default) base URL and path.
    pub fn configured_endpoint(&self) -> String {
        construct_api_url(self.base_url(), self.chat_path())
    }

    /// Pick the endpoint: explicit flag, then environment, then config.
    pub fn resolve_endpoint(&self, cli_endpoint: Option<&str>, env_endpoint: Option<&str>) -> String {
        [cli_endpoint, env_endpoint]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|endpoint| !endpoint.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.configured_endpoint())
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::ChatPath => self.chat_path.as_deref(),
            ConfigKey::Theme => self.theme.as_deref(),
            ConfigKey::Title => self.title.as_deref(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: String) -> Result<(), String> {
        match key {
            ConfigKey::BaseUrl => {
                reqwest::Url::parse(&value)
                    .map_err(|err| format!("Invalid base-url '{value}': {err}"))?;
                self.base_url = Some(value);
            }
            ConfigKey::ChatPath => self.chat_path = Some(value),
            ConfigKey::Theme => {
                if !crate::ui::theme::Theme::is_known(&value) {
                    return Err(format!(
                        "Unknown theme: {value} (expected one of: {})",
                        crate::ui::theme::Theme::NAMES.join(", ")
                    ));
                }
                self.theme = Some(value);
            }
            ConfigKey::Title => self.title = Some(value),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::ChatPath => self.chat_path = None,
            ConfigKey::Theme => self.theme = None,
            ConfigKey::Title => self.title = None,
        }
    }
}

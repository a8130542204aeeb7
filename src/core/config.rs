//! Persistent user configuration.
//!
//! The configuration lives in a TOML file under the platform config
//! directory. A missing file is not an error; it simply yields the
//! defaults.

pub mod data;
pub mod io;
mod printing;

pub use data::{
    Config, ConfigKey, DEFAULT_BASE_URL, DEFAULT_CHAT_PATH, DEFAULT_TITLE, ENDPOINT_ENV_VAR,
};
pub use io::ConfigError;

//! Developer-facing trace output.
//!
//! The chat screen owns the terminal, so traces only go to a file named on
//! the command line. Nothing is installed otherwise and `tracing` macros
//! become no-ops.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `parley=debug`.
pub const LOG_FILTER_ENV_VAR: &str = "PARLEY_LOG";
const DEFAULT_FILTER: &str = "info";

pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Append plain-text traces to `path`, filtered by [`LOG_FILTER_ENV_VAR`].
pub fn init_file_tracing(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| format!("Failed to open trace file {}: {err}", path.display()))?;

    let directive = std::env::var(LOG_FILTER_ENV_VAR).ok();
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(directive.as_deref()))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

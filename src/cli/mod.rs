//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::app::App;
use crate::core::config::{Config, ConfigKey, ENDPOINT_ENV_VAR};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_file_tracing;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "A terminal client for a question/answer chat endpoint")]
#[command(
    long_about = "Parley is a full-screen terminal client for a single chat endpoint. \
Each question is posted as JSON to the endpoint and the answer is shown below it.\n\n\
Endpoint resolution (first match wins):\n\
  --endpoint <URL>      Command-line flag\n\
  PARLEY_ENDPOINT       Environment variable\n\
  base-url/chat-path    Config file values (see 'parley config')\n\
  default               http://localhost:8080/chat\n\n\
Controls:\n\
  Type                  Enter your question in the input field\n\
  Enter / [ Send ]      Send the question\n\
  F1 / [ Show Help ]    Toggle the help panel\n\
  Up/Down/PgUp/PgDn     Scroll the conversation\n\
  Esc or Ctrl+C         Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint URL, overriding PARLEY_ENDPOINT and the config file
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Append developer traces to this file (filter with PARLEY_LOG)
    #[arg(long, global = true, value_name = "PATH")]
    pub trace_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set a configuration value
    Set {
        /// Configuration key to set (base-url, chat-path, theme, title)
        key: String,
        /// Value to set; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = args.trace_file.as_deref() {
        init_file_tracing(path)?;
    }

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let env_endpoint = std::env::var(ENDPOINT_ENV_VAR).ok();
            let app = App::new(&config, args.endpoint.as_deref(), env_endpoint.as_deref());
            run_chat(app).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let message = apply_set(&mut config, &key, &value)?;
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            let message = apply_unset(&mut config, &key)?;
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            Ok(())
        }
    }
}

fn apply_set(config: &mut Config, key: &str, value: &[String]) -> Result<String, Box<dyn Error>> {
    let key: ConfigKey = key.parse()?;
    let value = value.join(" ");
    if value.trim().is_empty() {
        return Err(format!("A value is required for {key}").into());
    }
    config.set(key, value.clone())?;
    Ok(format!("Set {key} to: {value}"))
}

fn apply_unset(config: &mut Config, key: &str) -> Result<String, Box<dyn Error>> {
    let key: ConfigKey = key.parse()?;
    config.unset(key);
    Ok(format!("Unset {key}"))
}

#[cfg(test)]
mod tests;

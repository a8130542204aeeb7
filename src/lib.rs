//! Parley is a full-screen terminal client for a single question/answer
//! chat endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state, the help panel state machine,
//!   configuration, and the one outbound HTTP request.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that turns key presses and mouse clicks into actions.
//! - [`api`] defines the request/response payloads of the wire contract.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! parses arguments and either edits configuration or starts
//! [`ui::chat_loop::run_chat`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;

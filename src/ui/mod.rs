//! Terminal UI layer for the interactive chat screen.
//!
//! - [`chat_loop`]: the event loop that turns input into
//!   [`AppAction`](crate::core::app::AppAction)s and runs the resulting commands.
//! - [`renderer`] and [`layout`]: frame composition and the screen regions
//!   shared with mouse hit-testing.
//! - [`theme`]: color and style policy.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the conversation and the request it issues.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;

pub mod app;
pub mod chat_request;
pub mod config;
pub mod help;
pub mod message;

//! Mdchat - Markdown-flavored chat over a stateless relay
//!
//! This library provides an HTTP relay endpoint that forwards chat
//! conversations to an LLM completion API, plus a terminal client whose
//! session records live on the user's own machine.

pub mod cli;
mod config;
pub mod core;
pub mod relay;
pub mod session;
pub mod storage;
pub mod utils;

pub use crate::config::Settings;

pub use crate::core::llm::{CompletionClient, CompletionError};
pub use crate::core::relay::RelayClient;
pub use crate::relay::{create_router, ChatRequest, RelayState, GENERIC_ERROR, MARKDOWN_INSTRUCTION};
pub use crate::session::{Role, SessionRecord, SessionStore, Turn};
pub use crate::storage::SessionStorage;

//! BCA Expert: a chat endpoint for the Building Code of Australia.
//!
//! A message is matched against four built-in NCC 2022 topics, the matched
//! excerpt is appended to the system prompt, and the exchange is forwarded
//! to a chat-completions API. The binary entry point is `src/main.rs`.

mod core;

pub mod bootstrap;
pub mod chat;
pub mod knowledge;
pub mod llm;
pub mod server;

pub use self::core::{config, error};
pub use bootstrap::logger;

//! Bootstrap layer: runs before the server starts.
//!
//! - **cli**: command-line flag parsing.
//! - **logger**: tracing-subscriber initialisation.

pub mod cli;
pub mod logger;

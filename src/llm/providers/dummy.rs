//! Offline backend: echoes the user message prefixed with `[echo]`.
//! Lets the endpoint run end to end without credentials.

use crate::llm::CompletionFailure;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionFailure> {
        Ok(format!("[echo] {user}"))
    }
}

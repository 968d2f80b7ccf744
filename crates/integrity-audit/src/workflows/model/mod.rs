//! Generative model boundary. The audit core only needs text back for a
//! prompt; transport, credentials and timeouts live behind this trait.

mod gemini;

pub use gemini::{GeminiClient, GenerationSettings};

use std::fmt::Debug;

/// Blocking text generation collaborator. Implementations do not retry.
pub trait TextModel: Debug + Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model API key not configured")]
    MissingApiKey,
    #[error("model transport failed: {0}")]
    Transport(String),
    #[error("model API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model response could not be decoded: {0}")]
    Decode(String),
    #[error("no content in model response")]
    EmptyResponse,
}

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during provider operations.
#[derive(Debug)]
pub enum ProviderError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response envelope.
    Parse(String),
    /// The response parsed but carried no text.
    Empty,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
            ProviderError::Empty => write!(f, "empty response"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a generation request.
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
}

#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one prompt and returns the raw text of the reply.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, ProviderError>;
}

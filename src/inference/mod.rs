pub mod provider;
pub mod providers;

pub use provider::{GenerationRequest, ProviderError, TextProvider};
pub use providers::{GeminiProvider, OpenRouterProvider};

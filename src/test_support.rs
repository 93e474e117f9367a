//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::lookup::{DefinitionLookup, PromptLanguages};
use crate::core::store::WordLists;
use crate::inference::{GenerationRequest, ProviderError, TextProvider};

/// A provider that answers every prompt with the same text.
pub struct CannedProvider {
    reply: String,
    calls: AtomicUsize,
}

impl CannedProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _request: GenerationRequest<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// A provider whose every call fails at the network level.
pub struct FailingProvider;

#[async_trait]
impl TextProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: GenerationRequest<'_>) -> Result<String, ProviderError> {
        Err(ProviderError::Network("connection refused".to_string()))
    }
}

pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Creates a test App over the given lists with a canned provider.
pub fn test_app(to_learn: &[&str], known: &[&str]) -> crate::core::state::App {
    let lookup = DefinitionLookup::new(
        Arc::new(CannedProvider::new(r#"{"meaning": "X", "usage": "Y"}"#)),
        "test-model".to_string(),
        PromptLanguages::default(),
    );
    crate::core::state::App::new(lookup, WordLists::new(words(to_learn), words(known)))
}

/// Renders with `draw` into a `width` x `height` test terminal and returns the
/// screen as text, one line per row.
pub fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

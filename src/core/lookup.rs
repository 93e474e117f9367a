//! # Definition Lookup
//!
//! Turns a single word into a meaning + example sentence by asking a text
//! model. The reply is expected to be a JSON object, possibly wrapped in a
//! markdown code fence:
//!
//! ```text
//! raw reply ─▶ strip_code_fence() ─▶ parse_definition() ─▶ DefinitionResult
//! ```
//!
//! Each stage is a separate function so it can be tested on its own.
//! [`DefinitionLookup::fetch_definition`] glues them to a provider call and
//! turns every failure into `None`.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Deserializer};

use crate::inference::{GenerationRequest, ProviderError, TextProvider};

/// Shown in place of a field the model left out.
pub const NOT_FOUND: &str = "Not found.";

pub const DEFAULT_DEFINITION_LANGUAGE: &str = "Turkish";
pub const DEFAULT_EXAMPLE_LANGUAGE: &str = "English";

/// Meaning and example sentence for one word. Never persisted.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionResult {
    #[serde(default, alias = "anlam", deserialize_with = "lenient_text")]
    pub meaning: Option<String>,
    #[serde(default, alias = "kullanim", deserialize_with = "lenient_text")]
    pub usage: Option<String>,
}

impl DefinitionResult {
    pub fn meaning_or_placeholder(&self) -> &str {
        self.meaning.as_deref().unwrap_or(NOT_FOUND)
    }

    pub fn usage_or_placeholder(&self) -> &str {
        self.usage.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Languages the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLanguages {
    /// Language of the definition text.
    pub definition: String,
    /// Language of the example sentence.
    pub example: String,
}

impl Default for PromptLanguages {
    fn default() -> Self {
        Self {
            definition: DEFAULT_DEFINITION_LANGUAGE.to_string(),
            example: DEFAULT_EXAMPLE_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum LookupError {
    Provider(ProviderError),
    Parse(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Provider(e) => write!(f, "{e}"),
            LookupError::Parse(msg) => write!(f, "unreadable definition: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<ProviderError> for LookupError {
    fn from(e: ProviderError) -> Self {
        LookupError::Provider(e)
    }
}

// ============================================================================
// Pure stages
// ============================================================================

/// Builds the fixed request template for `word`.
pub fn build_prompt(word: &str, languages: &PromptLanguages) -> String {
    format!(
        "Give the {def} meaning of the word '{word}', followed by its part of speech \
         in parentheses (for example: noun, verb, adjective, adverb), and one simple \
         {ex} example sentence that uses the word.\n\
         Reply ONLY with a JSON object with exactly two keys, \"meaning\" and \"usage\". \
         Do not add any other explanation.\n\
         Example: {{\"meaning\": \"The meaning of something. (Part of speech)\", \
         \"usage\": \"This is an example sentence.\"}}",
        def = languages.definition,
        ex = languages.example,
    )
}

/// Removes a surrounding markdown code fence and whitespace.
///
/// Handles an opening fence with or without a language tag (```` ```json ````)
/// and a closing fence. Text without fences is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Language tag: the run of tag characters right after the fence
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses an already fence-stripped reply. Must be a JSON object.
pub fn parse_definition(text: &str) -> Result<DefinitionResult, LookupError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LookupError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(LookupError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| LookupError::Parse(e.to_string()))
}

/// Accepts any JSON value for a text field. Arrays are joined with spaces,
/// numbers and booleans are written out, `null` counts as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_text(value))
}

fn value_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// A provider plus the settings needed to ask it for definitions.
#[derive(Clone)]
pub struct DefinitionLookup {
    provider: Arc<dyn TextProvider>,
    model: String,
    languages: PromptLanguages,
}

impl DefinitionLookup {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        model: String,
        languages: PromptLanguages,
    ) -> Self {
        Self {
            provider,
            model,
            languages,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// One provider request, no retries, no caching.
    pub async fn try_fetch_definition(
        &self,
        word: &str,
    ) -> Result<DefinitionResult, LookupError> {
        let prompt = build_prompt(word, &self.languages);
        info!(
            "Looking up '{}' via {} ({})",
            word,
            self.provider.name(),
            self.model
        );
        let raw = self
            .provider
            .generate(GenerationRequest {
                prompt: &prompt,
                model: &self.model,
            })
            .await?;
        debug!("Raw definition reply: {}", raw);
        parse_definition(strip_code_fence(&raw))
    }

    /// Like [`try_fetch_definition`](Self::try_fetch_definition), with failure reported as `None`.
    pub async fn fetch_definition(&self, word: &str) -> Option<DefinitionResult> {
        match self.try_fetch_definition(word).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Definition lookup for '{}' failed: {}", word, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedProvider, FailingProvider};

    #[test]
    fn test_strip_code_fence_json_tag() {
        let raw = "```json\n{\"anlam\": \"X\", \"kullanim\": \"Y\"}\n```";
        assert_eq!(
            strip_code_fence(raw),
            "{\"anlam\": \"X\", \"kullanim\": \"Y\"}"
        );
    }

    #[test]
    fn test_strip_code_fence_no_tag() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_code_fence_single_line() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_code_fence_plain_text_is_trimmed() {
        assert_eq!(strip_code_fence("  \n{\"a\": 1}\n\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_surrounding_whitespace() {
        assert_eq!(strip_code_fence("\n\n  ```json\n{}\n```  \n"), "{}");
    }

    #[test]
    fn test_fenced_and_unfenced_parse_identically() {
        let fenced = "```json\n{\"anlam\": \"X\", \"kullanim\": \"Y\"}\n```";
        let plain = "{\"anlam\": \"X\", \"kullanim\": \"Y\"}";
        let a = parse_definition(strip_code_fence(fenced)).unwrap();
        let b = parse_definition(strip_code_fence(plain)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.meaning.as_deref(), Some("X"));
        assert_eq!(a.usage.as_deref(), Some("Y"));
    }

    #[test]
    fn test_parse_english_keys() {
        let result =
            parse_definition(r#"{"meaning": "kelime (isim)", "usage": "A word."}"#).unwrap();
        assert_eq!(result.meaning_or_placeholder(), "kelime (isim)");
        assert_eq!(result.usage_or_placeholder(), "A word.");
    }

    #[test]
    fn test_parse_missing_field_uses_placeholder() {
        let result = parse_definition(r#"{"meaning": "X"}"#).unwrap();
        assert_eq!(result.meaning_or_placeholder(), "X");
        assert_eq!(result.usage_or_placeholder(), NOT_FOUND);
    }

    #[test]
    fn test_parse_empty_object_is_all_placeholders() {
        let result = parse_definition("{}").unwrap();
        assert_eq!(result, DefinitionResult::default());
        assert_eq!(result.meaning_or_placeholder(), NOT_FOUND);
    }

    #[test]
    fn test_parse_prose_fails() {
        assert!(matches!(
            parse_definition("Sure! The word means happy."),
            Err(LookupError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_truncated_object_fails() {
        assert!(parse_definition(r#"{"meaning": "X", "usa"#).is_err());
    }

    #[test]
    fn test_parse_non_object_fails() {
        assert!(parse_definition(r#"["X", "Y"]"#).is_err());
        assert!(parse_definition(r#""X""#).is_err());
    }

    #[test]
    fn test_parse_array_field_keeps_meaning() {
        let result = parse_definition(r#"{"meaning": "x", "usage": ["A.", "B."]}"#).unwrap();
        assert_eq!(result.meaning_or_placeholder(), "x");
        assert_eq!(result.usage_or_placeholder(), "A. B.");
    }

    #[test]
    fn test_parse_odd_field_types() {
        let result = parse_definition(r#"{"meaning": 42, "usage": null}"#).unwrap();
        assert_eq!(result.meaning_or_placeholder(), "42");
        assert_eq!(result.usage_or_placeholder(), NOT_FOUND);

        let result = parse_definition(r#"{"meaning": {"tr": "kelime"}, "usage": []}"#).unwrap();
        assert_eq!(result.meaning_or_placeholder(), r#"{"tr":"kelime"}"#);
        assert_eq!(result.usage_or_placeholder(), NOT_FOUND);
    }

    #[test]
    fn test_build_prompt_mentions_word_and_keys() {
        let prompt = build_prompt("serendipity", &PromptLanguages::default());
        assert!(prompt.contains("'serendipity'"));
        assert!(prompt.contains("\"meaning\""));
        assert!(prompt.contains("\"usage\""));
        assert!(prompt.contains("Turkish"));
        assert!(prompt.contains("English"));
    }

    #[test]
    fn test_fetch_definition_success() {
        let provider = Arc::new(CannedProvider::new(
            "```json\n{\"meaning\": \"X\", \"usage\": \"Y\"}\n```",
        ));
        let lookup = DefinitionLookup::new(
            provider.clone(),
            "test-model".to_string(),
            PromptLanguages::default(),
        );
        let result = tokio_test::block_on(lookup.fetch_definition("word")).unwrap();
        assert_eq!(result.meaning.as_deref(), Some("X"));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_fetch_definition_malformed_is_none() {
        let lookup = DefinitionLookup::new(
            Arc::new(CannedProvider::new("I don't know that word.")),
            "test-model".to_string(),
            PromptLanguages::default(),
        );
        assert!(tokio_test::block_on(lookup.fetch_definition("word")).is_none());
    }

    #[test]
    fn test_fetch_definition_provider_error_is_none() {
        let lookup = DefinitionLookup::new(
            Arc::new(FailingProvider),
            "test-model".to_string(),
            PromptLanguages::default(),
        );
        assert!(tokio_test::block_on(lookup.fetch_definition("word")).is_none());
        let err = tokio_test::block_on(lookup.try_fetch_definition("word")).unwrap_err();
        assert!(matches!(err, LookupError::Provider(_)));
    }

    #[test]
    fn test_fetch_definition_does_not_cache() {
        let provider = Arc::new(CannedProvider::new(r#"{"meaning": "X", "usage": "Y"}"#));
        let lookup = DefinitionLookup::new(
            provider.clone(),
            "test-model".to_string(),
            PromptLanguages::default(),
        );
        tokio_test::block_on(lookup.fetch_definition("word"));
        tokio_test::block_on(lookup.fetch_definition("word"));
        assert_eq!(provider.calls(), 2);
    }
}

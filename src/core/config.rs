//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wordcards/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Provider;
use crate::core::lookup::{DEFAULT_DEFINITION_LANGUAGE, DEFAULT_EXAMPLE_LANGUAGE, PromptLanguages};
use crate::core::store::{KNOWN_FILE, TO_LEARN_FILE};
use crate::inference::providers::{DEFAULT_GEMINI_BASE_URL, DEFAULT_OPENROUTER_BASE_URL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WordcardsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub openrouter: ProviderConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub definition_language: Option<String>,
    pub example_language: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WordsConfig {
    pub to_learn_file: Option<String>,
    pub known_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-lite-latest";
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.5-flash-lite";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub languages: PromptLanguages,
    pub to_learn_path: PathBuf,
    pub known_path: PathBuf,
}

impl ResolvedConfig {
    /// The credential for the selected provider, or the error that stops startup.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey {
                provider: self.provider,
                env_var: api_key_env_var(self.provider),
            })
    }
}

/// CLI flags that take part in resolution (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub to_learn_file: Option<PathBuf>,
    pub known_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    UnknownProvider(String),
    MissingApiKey {
        provider: Provider,
        env_var: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::UnknownProvider(name) => {
                write!(f, "unknown provider '{name}' (expected gemini or openrouter)")
            }
            ConfigError::MissingApiKey { provider, env_var } => write!(
                f,
                "no API key for {} (set {env_var} or [{}].api_key in {})",
                provider.name(),
                provider.name(),
                config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn api_key_env_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "GEMINI_API_KEY",
        Provider::OpenRouter => "OPENROUTER_API_KEY",
    }
}

fn base_url_env_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "GEMINI_BASE_URL",
        Provider::OpenRouter => "OPENROUTER_BASE_URL",
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.wordcards`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wordcards"))
}

/// Returns the path to `~/.wordcards/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.wordcards/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WordcardsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WordcardsConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WordcardsConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(WordcardsConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<WordcardsConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WordcardsConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!(
        "Config: provider={:?}, model={:?}, words={:?}",
        config.general.provider, config.general.model, config.words
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# wordcards configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# provider = "gemini"                # "gemini" or "openrouter"
# model = "gemini-flash-lite-latest"
# definition_language = "Turkish"    # language of the meaning
# example_language = "English"       # language of the example sentence

# [words]
# to_learn_file = "to_learn.json"    # relative paths are under ~/.wordcards/
# known_file = "known.json"

# [gemini]
# api_key = "..."                    # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &WordcardsConfig,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &WordcardsConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Provider: CLI → env → config → default
    let provider = match cli.provider {
        Some(p) => p,
        None => match env("WORDCARDS_PROVIDER").or_else(|| config.general.provider.clone()) {
            Some(name) => {
                Provider::from_name(&name).ok_or(ConfigError::UnknownProvider(name))?
            }
            None => Provider::default(),
        },
    };

    let provider_config = match provider {
        Provider::Gemini => &config.gemini,
        Provider::OpenRouter => &config.openrouter,
    };

    // Model: CLI → env → config → provider default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("WORDCARDS_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| default_model(provider).to_string());

    // API key: env → config
    let api_key = env(api_key_env_var(provider)).or_else(|| provider_config.api_key.clone());

    // Base URL: env → config → default
    let base_url = env(base_url_env_var(provider))
        .or_else(|| provider_config.base_url.clone())
        .unwrap_or_else(|| default_base_url(provider).to_string());

    let languages = PromptLanguages {
        definition: config
            .general
            .definition_language
            .clone()
            .unwrap_or_else(|| DEFAULT_DEFINITION_LANGUAGE.to_string()),
        example: config
            .general
            .example_language
            .clone()
            .unwrap_or_else(|| DEFAULT_EXAMPLE_LANGUAGE.to_string()),
    };

    let dir = data_dir().unwrap_or_else(|| PathBuf::from("."));
    let to_learn_path = cli.to_learn_file.clone().unwrap_or_else(|| {
        word_file_path(&dir, config.words.to_learn_file.as_deref(), TO_LEARN_FILE)
    });
    let known_path = cli
        .known_file
        .clone()
        .unwrap_or_else(|| word_file_path(&dir, config.words.known_file.as_deref(), KNOWN_FILE));

    Ok(ResolvedConfig {
        provider,
        model_name,
        api_key,
        base_url,
        languages,
        to_learn_path,
        known_path,
    })
}

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => DEFAULT_GEMINI_MODEL,
        Provider::OpenRouter => DEFAULT_OPENROUTER_MODEL,
    }
}

fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => DEFAULT_GEMINI_BASE_URL,
        Provider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
    }
}

/// Relative config paths live under the data dir; absolute ones are used as-is.
fn word_file_path(dir: &Path, configured: Option<&str>, default_name: &str) -> PathBuf {
    match configured {
        Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
        Some(p) => dir.join(p),
        None => dir.join(default_name),
    }
}

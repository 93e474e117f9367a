use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use wordcards::Provider;
use wordcards::core::config::{self, CliOverrides, ConfigError, ResolvedConfig};
use wordcards::core::lookup::DefinitionLookup;
use wordcards::core::store::WordStore;
use wordcards::inference::{GeminiProvider, OpenRouterProvider, TextProvider};

#[derive(Parser)]
#[command(name = "wordcards", about = "Vocabulary flashcards with model-generated definitions")]
struct Args {
    /// LLM provider to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name (provider specific)
    #[arg(short, long)]
    model: Option<String>,

    /// Word list still to learn (JSON)
    #[arg(long, value_name = "FILE")]
    to_learn: Option<PathBuf>,

    /// Word list already known (JSON)
    #[arg(long, value_name = "FILE")]
    known: Option<PathBuf>,

    /// Log file verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Debug)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Build a provider from the resolved config. A missing credential is fatal.
fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn TextProvider>, ConfigError> {
    let api_key = config.require_api_key()?.to_string();
    let base_url = Some(config.base_url.clone());
    let provider: Arc<dyn TextProvider> = match config.provider {
        Provider::Gemini => Arc::new(GeminiProvider::new(api_key, base_url)),
        Provider::OpenRouter => Arc::new(OpenRouterProvider::new(api_key, base_url)),
    };
    log::info!("Using provider: {}", provider.name());
    Ok(provider)
}

fn startup(args: &Args) -> Result<(DefinitionLookup, WordStore), ConfigError> {
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        provider: args.provider,
        model: args.model.clone(),
        to_learn_file: args.to_learn.clone(),
        known_file: args.known.clone(),
    };
    let resolved = config::resolve(&file_config, &cli)?;
    log::info!(
        "Resolved config: provider={}, model={}, words={} / {}",
        resolved.provider.name(),
        resolved.model_name,
        resolved.to_learn_path.display(),
        resolved.known_path.display()
    );

    let provider = build_provider(&resolved)?;
    let lookup = DefinitionLookup::new(provider, resolved.model_name, resolved.languages);
    let store = WordStore::new(resolved.to_learn_path, resolved.known_path);
    Ok((lookup, store))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wordcards.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wordcards.log") {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }

    log::info!("wordcards starting up");

    let (lookup, store) = match startup(&args) {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("wordcards: {e}");
            return ExitCode::FAILURE;
        }
    };

    match wordcards::tui::run(lookup, store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("wordcards: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Config handling

use std::path::PathBuf;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::constants::OPENROUTER_CHAT_COMPLETIONS_URL;

/// Runtime settings carried into the pipeline and the web UI.
///
/// Built once at the entry point from CLI flags and environment variables;
/// nothing below the entry point reads the environment directly.
#[derive(Clone, Debug)]
pub struct Settings {
    /// OpenRouter API key, if one was provided at startup. The web form can
    /// supply one per request instead.
    pub api_key: Option<String>,
    /// Base folder generated artifacts are written under.
    pub output_base: PathBuf,
    /// Model identifier used for generation requests.
    pub model: String,
    /// Chat-completions endpoint.
    pub endpoint: String,
}

impl Settings {
    /// Builds settings from parsed CLI options.
    #[must_use]
    pub fn from_cli(cli: &CliOptions) -> Self {
        Settings {
            api_key: cli.api_key.clone().filter(|key| !key.trim().is_empty()),
            output_base: cli.output_dir.clone(),
            model: cli.model.clone(),
            endpoint: cli
                .endpoint
                .clone()
                .unwrap_or_else(|| OPENROUTER_CHAT_COMPLETIONS_URL.to_string()),
        }
    }
}

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

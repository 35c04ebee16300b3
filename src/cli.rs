//! CLI parser
use std::num::NonZeroU16;
use std::path::PathBuf;

use clap::Parser;

use crate::constants::DEFAULT_MODEL;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "PIXROUTE_DEBUG")]
    /// Enable debug logging. Env: PIXROUTE_DEBUG
    pub debug: bool,

    #[clap(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    /// OpenRouter API key. Required for one-shot runs; the web form can
    /// supply one per request instead. Env: OPENROUTER_API_KEY
    pub api_key: Option<String>,

    #[clap(long, short, default_value = "./output", env = "PIXROUTE_OUTPUT_DIR")]
    /// Base folder generated artifacts are written under, defaults to
    /// `./output`. Env: PIXROUTE_OUTPUT_DIR
    pub output_dir: PathBuf,

    #[clap(long, short, default_value = DEFAULT_MODEL, env = "PIXROUTE_MODEL")]
    /// Model identifier for generation requests.
    /// Env: PIXROUTE_MODEL
    pub model: String,

    #[clap(
        long,
        default_value = "prompt_info.yaml",
        env = "PIXROUTE_PROMPT_INFO"
    )]
    /// Path to the prompt-info YAML read in one-shot mode.
    /// Env: PIXROUTE_PROMPT_INFO
    pub prompt_info: PathBuf,

    #[clap(long, env = "PIXROUTE_ENDPOINT")]
    /// Override the chat-completions endpoint (proxies, testing).
    /// Env: PIXROUTE_ENDPOINT
    pub endpoint: Option<String>,

    #[clap(long, env = "PIXROUTE_SERVE")]
    /// Serve the web form UI instead of running one generation.
    /// Env: PIXROUTE_SERVE
    pub serve: bool,

    #[clap(long, default_value = "9000", env = "PIXROUTE_PORT")]
    /// Web UI listener port, defaults to `9000`. Env: PIXROUTE_PORT
    pub port: NonZeroU16,

    #[clap(long, default_value = "127.0.0.1", env = "PIXROUTE_LISTEN_ADDRESS")]
    /// Web UI listen address, defaults to `127.0.0.1`.
    /// Env: PIXROUTE_LISTEN_ADDRESS
    pub listen_address: String,
}

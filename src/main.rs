use anyhow::Context;
use clap::Parser;
use pixroute::cli::CliOptions;
use pixroute::client::OpenRouterClient;
use pixroute::config::{Settings, setup_logging};
use pixroute::generate::run_generation;
use pixroute::request::PromptInfo;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let settings = Settings::from_cli(&cli);

    if cli.serve {
        if let Err(err) =
            pixroute::web::setup_server(&cli.listen_address, cli.port, settings).await
        {
            error!("Application error: {}", err);
        }
        return;
    }

    if let Err(err) = run_once(&cli, &settings).await {
        error!("{:#}", err);
    }
}

/// Runs one generation from the prompt-info YAML and reports the outcome.
async fn run_once(cli: &CliOptions, settings: &Settings) -> anyhow::Result<()> {
    let api_key = settings.api_key.as_deref().context(
        "An OpenRouter API key is required: pass --api-key or set OPENROUTER_API_KEY",
    )?;

    let raw = std::fs::read_to_string(&cli.prompt_info)
        .with_context(|| format!("Failed to read {}", cli.prompt_info.display()))?;
    let prompt = PromptInfo::from_yaml(&raw)?;

    let client = OpenRouterClient::new(api_key)?.with_endpoint(settings.endpoint.clone());
    let outcome =
        run_generation(&client, &prompt, &settings.model, &settings.output_base).await?;

    if let Some(content) = &outcome.content {
        info!("Model output: {}", content);
    }
    if outcome.image_count == 0 {
        warn!(
            "No images generated; finish reason: {}",
            outcome.finish_reason.as_deref().unwrap_or("unknown")
        );
    }
    info!(
        "Artifacts written to {}",
        outcome.artifacts.output_dir.display()
    );
    Ok(())
}

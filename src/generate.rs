//! The build → submit → persist pipeline shared by the CLI and the web UI.

use std::path::Path;

use tracing::{info, warn};

use crate::client::OpenRouterClient;
use crate::error::PixrouteError;
use crate::persist::{self, SavedArtifacts};
use crate::request::{self, PromptInfo};

/// Summary of one completed generation.
#[derive(Clone, Debug)]
pub struct GenerationOutcome {
    /// Where the artifacts were written.
    pub artifacts: SavedArtifacts,
    /// Assistant text accompanying the images, if any.
    pub content: Option<String>,
    /// Number of generated images.
    pub image_count: usize,
    /// Upstream finish reason; the diagnostic to look at when
    /// `image_count` is zero.
    pub finish_reason: Option<String>,
}

/// Runs one generation end to end and persists the artifacts.
///
/// Nothing is written unless the API answers with status 200; any other
/// status is surfaced verbatim with its body. Zero generated images is
/// not an error: the response is still persisted and the upstream finish
/// reason is reported.
///
/// # Errors
/// Fails with a validation error before any network traffic when the prompt
/// references a missing file, and with transport/upstream/malformed-response
/// errors after that.
pub async fn run_generation(
    client: &OpenRouterClient,
    prompt: &PromptInfo,
    model: &str,
    output_base: &Path,
) -> Result<GenerationOutcome, PixrouteError> {
    let messages = request::build_messages(prompt)?;

    info!("Submitting generation request to {}", model);
    let response = client.submit(&messages, model).await?;

    let status = response.status();
    let body = response.text().await?;
    // Only a plain 200 counts as success; other 2xx codes are not expected
    // from this endpoint and get reported like any other status.
    if status.as_u16() != 200 {
        return Err(PixrouteError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let raw: serde_json::Value = serde_json::from_str(&body).map_err(|err| {
        PixrouteError::MalformedResponse(format!("Response body is not JSON: {err}"))
    })?;

    let (artifacts, parsed) = persist::persist(output_base, &raw, prompt)?;

    let choice = parsed.first_choice();
    let content = choice.and_then(|choice| choice.message.content.clone());
    let finish_reason = choice.and_then(|choice| choice.native_finish_reason.clone());
    let image_count = artifacts.image_paths.len();
    if image_count == 0 {
        warn!(
            "No images generated (finish reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        );
    } else {
        info!(
            "Saved {} image(s) to {}",
            image_count,
            artifacts.output_dir.display()
        );
    }

    Ok(GenerationOutcome {
        artifacts,
        content,
        image_count,
        finish_reason,
    })
}

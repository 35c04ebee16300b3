use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use crate::client::OpenRouterClient;
use crate::codec;
use crate::constants::MODEL_PRESETS;
use crate::error::PixrouteError;
use crate::generate::run_generation;
use crate::request::PromptInfo;
use crate::web::AppState;

/// One model option in the form's select box.
#[derive(Clone, Debug)]
pub(crate) struct ModelOption {
    pub(crate) id: String,
    pub(crate) selected: bool,
}

/// A generated image inlined into the result page.
#[derive(Clone, Debug)]
pub(crate) struct PreviewImage {
    pub(crate) file_name: String,
    pub(crate) data_url: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) models: Vec<ModelOption>,
    pub(crate) output_dir: String,
    pub(crate) has_default_key: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub(crate) struct ResultTemplate {
    pub(crate) error: Option<String>,
    pub(crate) content: String,
    pub(crate) image_count: usize,
    pub(crate) finish_reason: String,
    pub(crate) output_dir: String,
    pub(crate) images: Vec<PreviewImage>,
}

impl ResultTemplate {
    fn error(message: impl Into<String>) -> Self {
        ResultTemplate {
            error: Some(message.into()),
            content: String::new(),
            image_count: 0,
            finish_reason: String::new(),
            output_dir: String::new(),
            images: Vec::new(),
        }
    }
}

/// handles the / GET
pub(crate) async fn home_handler(State(state): State<AppState>) -> HomeTemplate {
    let models = MODEL_PRESETS
        .iter()
        .map(|id| ModelOption {
            id: (*id).to_string(),
            selected: *id == state.settings.model,
        })
        .collect();
    HomeTemplate {
        models,
        output_dir: state.settings.output_base.display().to_string(),
        has_default_key: state.settings.api_key.is_some(),
    }
}

/// The generation form posted from the home page.
#[derive(Deserialize)]
pub(crate) struct GenerateForm {
    prompt: String,
    #[serde(default)]
    image_paths: String,
    model: String,
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    output_dir: String,
}

/// handles the /generate POST
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Response, PixrouteError> {
    let prompt_text = form.prompt.trim();
    if prompt_text.is_empty() {
        return Ok(ResultTemplate::error("Please enter a prompt.").into_response());
    }

    let form_key = form.api_key.trim();
    let api_key = if form_key.is_empty() {
        match state.settings.api_key.as_deref() {
            Some(key) => key.to_string(),
            None => {
                return Ok(ResultTemplate::error(
                    "Please provide an OpenRouter API key.",
                )
                .into_response());
            }
        }
    } else {
        form_key.to_string()
    };

    let image_paths: Vec<String> = form
        .image_paths
        .lines()
        .map(|line| line.trim().trim_matches('"').to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if image_paths.is_empty() {
        return Ok(ResultTemplate::error(
            "Please provide at least one reference image path.",
        )
        .into_response());
    }
    for path in &image_paths {
        if !Path::new(path).exists() {
            return Ok(ResultTemplate::error(format!(
                "Image path does not exist: {path}"
            ))
            .into_response());
        }
    }

    let output_base = if form.output_dir.trim().is_empty() {
        state.settings.output_base.clone()
    } else {
        PathBuf::from(form.output_dir.trim())
    };

    let prompt = PromptInfo {
        text: prompt_text.to_string(),
        image_paths,
    };
    let client =
        OpenRouterClient::new(api_key)?.with_endpoint(state.settings.endpoint.clone());

    match run_generation(&client, &prompt, &form.model, &output_base).await {
        Ok(outcome) => {
            info!(
                "Web generation finished with {} image(s)",
                outcome.image_count
            );
            let images = preview_images(&outcome.artifacts.image_paths)?;
            Ok(ResultTemplate {
                error: None,
                content: outcome.content.unwrap_or_default(),
                image_count: outcome.image_count,
                finish_reason: outcome.finish_reason.unwrap_or_default(),
                output_dir: outcome.artifacts.output_dir.display().to_string(),
                images,
            }
            .into_response())
        }
        Err(PixrouteError::Upstream { status, body }) => Ok(ResultTemplate::error(format!(
            "API error (status {status}): {body}"
        ))
        .into_response()),
        Err(PixrouteError::Transport(err)) => {
            Ok(ResultTemplate::error(format!("Request failed: {err}")).into_response())
        }
        Err(PixrouteError::MalformedResponse(msg)) => {
            Ok(ResultTemplate::error(format!("Unusable API response: {msg}")).into_response())
        }
        Err(PixrouteError::Validation(msg)) => Ok(ResultTemplate::error(msg).into_response()),
        Err(err) => Err(err),
    }
}

/// Re-reads saved images and inlines them as data URLs for the result page.
fn preview_images(paths: &[PathBuf]) -> Result<Vec<PreviewImage>, PixrouteError> {
    let mut previews = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        let mime = match extension {
            "jpg" => "image/jpeg".to_string(),
            other => format!("image/{other}"),
        };
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        previews.push(PreviewImage {
            file_name,
            data_url: format!("data:{mime};base64,{}", codec::encode(&bytes)),
        });
    }
    Ok(previews)
}

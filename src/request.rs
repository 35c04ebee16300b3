//! Prompt records and chat-completions request assembly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::PixrouteError;

/// A user prompt: text plus an ordered list of local reference images.
///
/// This is both the input record (read from `prompt_info.yaml` or the web
/// form) and the audit record persisted next to the generated images.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PromptInfo {
    /// Prompt text sent to the model.
    #[serde(default)]
    pub text: String,
    /// Ordered local image paths inlined into the request.
    #[serde(default)]
    pub image_paths: Vec<String>,
}

impl PromptInfo {
    /// Parses a prompt-info YAML document.
    ///
    /// Paths sometimes arrive wrapped in literal quote characters (copied
    /// from a file manager); those are stripped here.
    ///
    /// # Errors
    /// Fails when the YAML cannot be parsed.
    pub fn from_yaml(raw: &str) -> Result<Self, PixrouteError> {
        let mut info: PromptInfo = serde_yaml::from_str(raw)?;
        for path in &mut info.image_paths {
            *path = path.trim_matches('"').to_string();
        }
        Ok(info)
    }

    /// Checks that every referenced image path exists.
    ///
    /// # Errors
    /// Fails with a validation error naming the first missing path.
    pub fn validate_paths(&self) -> Result<(), PixrouteError> {
        for path in &self.image_paths {
            if !Path::new(path).exists() {
                return Err(PixrouteError::Validation(format!(
                    "Image path does not exist: {path}"
                )));
            }
        }
        Ok(())
    }
}

/// One conversational turn in the outgoing request.
#[derive(Clone, Debug, Serialize)]
pub struct Message {
    /// Speaker role; always `user` here.
    pub role: &'static str,
    /// Ordered content parts: the prompt text first, then the images.
    pub content: Vec<ContentPart>,
}

/// A single content part of a chat message.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain prompt text.
    Text {
        /// The text itself.
        text: String,
    },
    /// An inline image carried as a data URL.
    ImageUrl {
        /// Wrapper object holding the data URL.
        image_url: ImageUrlPart,
    },
}

/// The `image_url` wrapper object on an outgoing image part.
#[derive(Clone, Debug, Serialize)]
pub struct ImageUrlPart {
    /// A `data:image/...;base64,...` URL.
    pub url: String,
}

/// Builds the single-user-turn message list for a prompt.
///
/// Reference images are inlined as data URLs in input order, after the text
/// part. The MIME label is fixed to `image/jpeg` whatever the source format;
/// OpenRouter keys off the payload bytes, not the label.
///
/// # Errors
/// Fails with a validation error when a referenced path does not exist, and
/// with an IO error when one cannot be read.
pub fn build_messages(prompt: &PromptInfo) -> Result<Vec<Message>, PixrouteError> {
    prompt.validate_paths()?;

    let mut content = Vec::with_capacity(prompt.image_paths.len() + 1);
    content.push(ContentPart::Text {
        text: prompt.text.clone(),
    });
    for path in &prompt.image_paths {
        let encoded = codec::encode_file(Path::new(path))?;
        content.push(ContentPart::ImageUrl {
            image_url: ImageUrlPart {
                url: format!("data:image/jpeg;base64,{encoded}"),
            },
        });
    }

    Ok(vec![Message {
        role: "user",
        content,
    }])
}

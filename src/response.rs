//! Typed views over the OpenRouter chat-completions response.
//!
//! The response is kept as raw JSON for persistence; these types are the
//! shape-checked view the rest of the crate reads. Everything not listed
//! here is ignored.

use serde::Deserialize;

use crate::constants::UNKNOWN_RESPONSE_ID;
use crate::error::PixrouteError;

/// The fields of a chat-completions response this crate reads.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    /// Server-assigned id, used to correlate output filenames.
    #[serde(default)]
    pub id: Option<String>,
    /// Completion choices; only the first is used.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Clone, Debug, Deserialize)]
pub struct Choice {
    /// The assistant message for this choice.
    #[serde(default)]
    pub message: ChoiceMessage,
    /// Finish reason passed through from the upstream model, useful as a
    /// diagnostic when no images come back.
    #[serde(default)]
    pub native_finish_reason: Option<String>,
}

/// The message body of a choice.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Assistant text accompanying the images, if any.
    #[serde(default)]
    pub content: Option<String>,
    /// Generated images, if any.
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A generated image reference.
#[derive(Clone, Debug, Deserialize)]
pub struct ImageRef {
    /// Wrapper object holding the data URL.
    pub image_url: ImageUrl,
}

/// The `image_url` wrapper on a generated image.
#[derive(Clone, Debug, Deserialize)]
pub struct ImageUrl {
    /// A data URL (or bare base64 string) containing the image bytes.
    pub url: String,
}

impl ChatResponse {
    /// Parses and shape-checks a raw response body.
    ///
    /// # Errors
    /// Fails with a malformed-response error when the JSON does not match
    /// the expected shape or `choices` is empty.
    pub fn from_value(raw: &serde_json::Value) -> Result<Self, PixrouteError> {
        let parsed: ChatResponse = serde_json::from_value(raw.clone()).map_err(|err| {
            PixrouteError::MalformedResponse(format!("Unexpected response shape: {err}"))
        })?;
        if parsed.choices.is_empty() {
            return Err(PixrouteError::MalformedResponse(
                "Response contained no choices".to_string(),
            ));
        }
        Ok(parsed)
    }

    /// The response id, falling back to the placeholder used in filenames.
    #[must_use]
    pub fn id_or_default(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_RESPONSE_ID)
    }

    /// The first choice, if present.
    #[must_use]
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }
}

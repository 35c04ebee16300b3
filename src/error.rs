//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// definitions for the pixroute application.
#[derive(Debug)]
pub enum PixrouteError {
    /// Bad user input: empty prompt, missing API key, nonexistent image path
    Validation(String),
    /// Transport failure talking to the API, including timeouts
    Transport(reqwest::Error),
    /// Non-success HTTP status from the API, body passed through verbatim
    Upstream {
        /// HTTP status code returned upstream
        status: u16,
        /// Response body text, unmodified
        body: String,
    },
    /// The response JSON did not have the expected shape
    MalformedResponse(String),
    /// Invalid base64 payload
    Decode(base64::DecodeError),
    /// A payload that decoded but was not a recognizable image
    ImageDecode(String),
    /// Directory or file write failure
    Io(std::io::Error),
    /// JSON/YAML serialization failure
    Serialize(String),
    /// Template rendering failure
    Render(String),
}

impl std::fmt::Display for PixrouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixrouteError::Validation(msg) => write!(f, "Validation error: {msg}"),
            PixrouteError::Transport(err) => write!(f, "Transport error: {err}"),
            PixrouteError::Upstream { status, body } => {
                write!(f, "API error (status {status}): {body}")
            }
            PixrouteError::MalformedResponse(msg) => write!(f, "Malformed response: {msg}"),
            PixrouteError::Decode(err) => write!(f, "Base64 decode error: {err}"),
            PixrouteError::ImageDecode(msg) => write!(f, "Image decode error: {msg}"),
            PixrouteError::Io(err) => write!(f, "IO error: {err}"),
            PixrouteError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            PixrouteError::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for PixrouteError {}

impl From<std::io::Error> for PixrouteError {
    fn from(err: std::io::Error) -> Self {
        PixrouteError::Io(err)
    }
}

impl From<reqwest::Error> for PixrouteError {
    fn from(err: reqwest::Error) -> Self {
        PixrouteError::Transport(err)
    }
}

impl From<base64::DecodeError> for PixrouteError {
    fn from(err: base64::DecodeError) -> Self {
        PixrouteError::Decode(err)
    }
}

impl From<serde_json::Error> for PixrouteError {
    fn from(err: serde_json::Error) -> Self {
        PixrouteError::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for PixrouteError {
    fn from(err: serde_yaml::Error) -> Self {
        PixrouteError::Serialize(err.to_string())
    }
}

impl From<askama::Error> for PixrouteError {
    fn from(err: askama::Error) -> Self {
        PixrouteError::Render(err.to_string())
    }
}

impl From<image::ImageError> for PixrouteError {
    fn from(err: image::ImageError) -> Self {
        PixrouteError::ImageDecode(err.to_string())
    }
}

impl IntoResponse for PixrouteError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PixrouteError::Validation(msg) => {
                info!("Rejected request: {}", msg);
                let mut response = axum::response::Response::new(axum::body::Body::from(msg));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            PixrouteError::Upstream { status, body } => {
                tracing::error!("Upstream error {}: {}", status, body);
                let mut response = axum::response::Response::new(axum::body::Body::from(format!(
                    "Upstream API error (status {status}): {body}"
                )));
                *response.status_mut() = axum::http::StatusCode::BAD_GATEWAY;
                response
            }
            other => {
                tracing::error!("Internal error: {}", other);
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "Internal server error",
                ));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

//! Shared constants for endpoints, models and timeouts.
//!

/// Default OpenRouter chat-completions endpoint.
pub const OPENROUTER_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Connect timeout for generation requests, in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Read timeout for generation requests, in seconds. Image models are slow.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Gemini 3 Pro image-preview model.
pub const MODEL_GEMINI_PRO_IMAGE: &str = "google/gemini-3-pro-image-preview";

/// Flux 2 Pro model.
pub const MODEL_FLUX_2_PRO: &str = "black-forest-labs/flux.2-pro";

/// Seedream 4.5 model.
pub const MODEL_SEEDREAM_4_5: &str = "bytedance-seed/seedream-4.5";

/// Flux 2 Klein model.
pub const MODEL_FLUX_KLEIN: &str = "black-forest-labs/flux.2-klein-4b";

/// Model used when none is specified.
pub const DEFAULT_MODEL: &str = MODEL_GEMINI_PRO_IMAGE;

/// Model presets offered by the web form.
pub const MODEL_PRESETS: [&str; 4] = [
    MODEL_GEMINI_PRO_IMAGE,
    MODEL_FLUX_2_PRO,
    MODEL_SEEDREAM_4_5,
    MODEL_FLUX_KLEIN,
];

/// Fallback id used in output filenames when the response carries none.
pub const UNKNOWN_RESPONSE_ID: &str = "unknown_id";

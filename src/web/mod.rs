//! Web form UI exposing the generation pipeline.

use std::num::NonZeroU16;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tracing::{error, info};

use crate::config::Settings;

mod views;

use views::{generate_handler, home_handler};

/// Shared state for the web handlers.
#[derive(Clone, Debug)]
pub(crate) struct AppState {
    settings: Settings,
}

impl AppState {
    fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(home_handler))
        .route("/generate", axum::routing::post(generate_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

/// Starts the web UI and blocks until the server exits.
///
/// # Errors
/// Fails when the listener cannot be bound.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    settings: Settings,
) -> Result<(), anyhow::Error> {
    let app = create_router().with_state(AppState::new(settings));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}

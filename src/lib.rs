//! CSV-upload front end for automated regression model selection.
//!
//! Two user-facing routes: `GET /` serves the upload form and
//! `POST /upload_csv/` parses the uploaded CSV, delegates to the
//! model-selection routine and renders the winning model together with a
//! plot of its held-out predictions.

pub mod analysis;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod plot;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use analysis::ModelSelector;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub selector: Arc<dyn ModelSelector + Send + Sync>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::home::index))
        .route("/upload_csv/", post(handlers::upload::upload_csv))
        .route("/health", get(handlers::health::check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

//! Portfolio SSR Gateway
//!
//! Server-side renders the portfolio/blog single-page application for SEO:
//! fetches content from the read-only content API, generates meta tags and
//! structured data, and embeds an initial-data blob the client bootstrap
//! hydrates from.

mod client;
mod config;
mod errors;
mod fetch;
mod models;
mod render;
mod seo;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use fetch::ContentFetcher;
use render::Route;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<ContentFetcher>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portfolio SSR Gateway");
    tracing::info!("Content API base: {}", config.api_base_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Create application state
    let state = AppState {
        fetcher: Arc::new(ContentFetcher::new(config.api_base_url.clone())),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Every other path goes through route classification and SSR.
        .fallback(ssr_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// SSR entry point: 404 for asset/API paths, otherwise always a 200 with a
/// complete HTML document (the static fallback shell if rendering fails).
async fn ssr_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();

    if Route::parse(path) == Route::Asset {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    let html = match render::render_route(&state.fetcher, path).await {
        Ok(html) => html,
        Err(err) => {
            tracing::error!("SSR failed for {}: {}", path, err);
            render::fallback_shell()
        }
    };

    (
        [
            (
                header::CACHE_CONTROL,
                "public, s-maxage=60, stale-while-revalidate=300",
            ),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (header::X_FRAME_OPTIONS, "DENY"),
            (header::X_XSS_PROTECTION, "1; mode=block"),
        ],
        Html(html),
    )
        .into_response()
}

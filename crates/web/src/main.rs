mod render;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use wishlink_core::links;
use wishlink_social::InviteResolver;
use wishlink_store_client::{StoreClient, StoreConfig};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<InviteResolver>,
    pub config: AppConfig,
}

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub site_name: String,
    pub deep_link_scheme: String,
    pub app_store_url: String,
    pub play_store_url: String,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<InviteResolver> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.resolver)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishlink_web=info,tower_http=info".into()),
        )
        .init();

    // Record store connection
    let store_config = StoreConfig::from_env()?;
    tracing::info!("record store: {}", store_config.base_url);
    let store = Arc::new(StoreClient::new(store_config)?);
    let resolver = Arc::new(InviteResolver::new(store));

    let base_url = std::env::var("BASE_URL")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            std::env::var("WISHLINK_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "http://localhost:3000".into());

    let config = AppConfig {
        base_url,
        site_name: env_or("WISHLINK_SITE_NAME", "WishLink"),
        deep_link_scheme: env_or("WISHLINK_APP_SCHEME", links::DEFAULT_APP_SCHEME),
        app_store_url: env_or("WISHLINK_APP_STORE_URL", links::APP_STORE_URL),
        play_store_url: env_or("WISHLINK_PLAY_STORE_URL", links::PLAY_STORE_URL),
    };

    let state = AppState { resolver, config };

    let mut app = Router::new()
        .route("/api/health", get(routes::health::health))
        // Invite landing page: code as query param or as path segment
        .route("/invite", get(routes::invite::by_query))
        .route("/invite/{code}", get(routes::invite::by_path));

    // Serve the static marketing pages if present
    let web_dir = std::env::var("WISHLINK_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("web/public"));
    if web_dir.exists() {
        tracing::info!("serving static files from {}", web_dir.display());
        let index_html = web_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&web_dir).fallback(ServeFile::new(index_html)));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    tracing::info!("starting server on port {port}");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use tracing::info;
use tracing_subscriber::EnvFilter;

use page_meta_server::app::create_app;
use page_meta_server::config::Config;
use page_meta_server::extractor::HttpExtractor;
use page_meta_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration first so APP_ENV from .env picks the log format.
    let config = Config::from_env().expect("Failed to load configuration");

    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("page_meta_server=info,tower_http=info"));

    if config.is_production {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Page metadata server starting...");
    info!(
        timeout_secs = config.fetch_timeout.as_secs(),
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let extractor = HttpExtractor::from_config(&config).expect("Failed to build HTTP client");
    let app = create_app(AppState::new(extractor));

    let addr = config.server_addr();
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed to start");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

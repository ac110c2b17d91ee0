use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use auth_cell::{
    ExpiryWatcher, InMemorySessionStore, PlatformTokenRefresher, ThresholdRefreshPolicy,
    TokenExpiryTracker,
};
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DealGrid API server");

    // Load configuration
    let config = AppConfig::from_env();
    let state = Arc::new(config);

    // Platform session tracking: store, policy, refresher, tracker, and
    // the one-second watcher that keeps the countdown current.
    let session_store = Arc::new(InMemorySessionStore::new());
    let tracker = Arc::new(TokenExpiryTracker::new(
        session_store.clone(),
        Arc::new(ThresholdRefreshPolicy::from_config(&state)),
        Arc::new(PlatformTokenRefresher::new(&state, session_store)),
    ));
    let _expiry_watcher = ExpiryWatcher::spawn(tracker.clone());

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(state, tracker)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use auth_cell::TokenExpiryTracker;
use dealer_cell::router::dealer_routes;
use reporting_cell::router::reporting_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>, tracker: Arc<TokenExpiryTracker>) -> Router {
    Router::new()
        .route("/", get(|| async { "DealGrid API is running!" }))
        .nest("/auth", auth_routes(state.clone(), tracker))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/dealers", dealer_routes(state.clone()))
        .nest("/reports", reporting_routes(state.clone()))
}

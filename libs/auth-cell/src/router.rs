use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{self, AuthCellState};
use crate::services::session::TokenExpiryTracker;

pub fn auth_routes(config: Arc<AppConfig>, tracker: Arc<TokenExpiryTracker>) -> Router {
    let state = AuthCellState { config, tracker };

    Router::new()
        .route("/validate", post(handlers::validate_token))
        .route("/verify", post(handlers::verify_token))
        .route("/session", get(handlers::get_session))
        .route("/session/refresh", post(handlers::refresh_session))
        .with_state(state)
}

// libs/dealer-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn dealer_routes(state: Arc<AppConfig>) -> Router {
    // All dealer management operations require authentication
    let protected_routes = Router::new()
        .route("/{dealer_id}", get(handlers::get_dealer))
        .route(
            "/{dealer_id}/deactivation-warning",
            get(handlers::get_deactivation_warning),
        )
        .route("/{dealer_id}/deactivate", post(handlers::deactivate_dealer))
        .route(
            "/invitations/{invitation_id}/resend",
            post(handlers::resend_invitation),
        )
        .route(
            "/invitations/{invitation_id}/cancel",
            post(handlers::cancel_invitation),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

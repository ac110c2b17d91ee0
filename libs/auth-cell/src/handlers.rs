use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_utils::jwt::validate_token as validate_jwt;

use crate::services::session::TokenExpiryTracker;

/// State container for the auth cell: config plus the platform session
/// tracker, injected explicitly rather than held as globals.
#[derive(Clone)]
pub struct AuthCellState {
    pub config: Arc<AppConfig>,
    pub tracker: Arc<TokenExpiryTracker>,
}

// Helper function to extract token
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Invalid authorization header format".to_string()));
    }

    Ok(auth_value[7..].to_string())
}

pub async fn validate_token(
    State(state): State<AuthCellState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;

    match validate_jwt(&token, &state.config.platform_jwt_secret) {
        Ok(user) => {
            let response = TokenResponse {
                valid: true,
                user_id: user.id,
                email: user.email,
                role: user.role,
            };

            Ok(Json(response))
        }
        Err(err) => Err(AppError::Auth(err)),
    }
}

pub async fn verify_token(
    State(state): State<AuthCellState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Verifying token");

    let token = extract_bearer_token(&headers)?;

    match validate_jwt(&token, &state.config.platform_jwt_secret) {
        Ok(_) => Ok(Json(json!({ "valid": true }))),
        Err(_) => Ok(Json(json!({ "valid": false }))),
    }
}

/// Current platform session countdown as the tracker sees it.
pub async fn get_session(
    State(state): State<AuthCellState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = state.tracker.snapshot();

    Ok(Json(json!({ "session": snapshot })))
}

/// Manually refresh the platform session. Suppressed when a refresh is
/// already in flight; failure is reported, never raised.
pub async fn refresh_session(
    State(state): State<AuthCellState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let refreshed = state.tracker.force_refresh().await;

    Ok(Json(json!({
        "refreshed": refreshed,
        "session": state.tracker.snapshot()
    })))
}

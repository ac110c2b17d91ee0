// libs/dealer-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::DealerError;
use crate::services::dealer::DealerService;
use crate::services::invitation::InvitationService;

fn map_dealer_error(e: DealerError) -> AppError {
    match e {
        DealerError::NotFound => AppError::NotFound("Dealer not found".to_string()),
        DealerError::InvitationNotFound => AppError::NotFound("Invitation not found".to_string()),
        DealerError::InvalidStatusTransition(status) => {
            AppError::Conflict(format!("Invitation cannot be modified in status {}", status))
        }
        DealerError::Unauthorized => {
            AppError::Auth("Not authorized to manage dealer records".to_string())
        }
        DealerError::ValidationError(msg) => AppError::BadRequest(msg),
        DealerError::PlatformError(msg) => AppError::ExternalService(msg),
    }
}

fn require_privileged(user: &User) -> Result<(), AppError> {
    if matches!(user.role.as_deref(), Some("admin") | Some("staff")) {
        Ok(())
    } else {
        Err(AppError::Auth("Not authorized to manage dealer records".to_string()))
    }
}

#[axum::debug_handler]
pub async fn get_dealer(
    State(state): State<Arc<AppConfig>>,
    Path(dealer_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    let is_own = dealer_id.to_string() == user.id;
    if !is_own {
        require_privileged(&user)?;
    }

    let dealer = DealerService::new(&state)
        .get_dealer(dealer_id, token)
        .await
        .map_err(map_dealer_error)?;

    Ok(Json(json!(dealer)))
}

/// What the dealer loses on deactivation; shown before the action runs.
#[axum::debug_handler]
pub async fn get_deactivation_warning(
    State(state): State<Arc<AppConfig>>,
    Path(dealer_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    require_privileged(&user)?;

    let warning = DealerService::new(&state)
        .deactivation_warning(dealer_id, token)
        .await
        .map_err(map_dealer_error)?;

    Ok(Json(json!({
        "warning": warning,
        "requires_confirmation": warning.has_open_work()
    })))
}

#[axum::debug_handler]
pub async fn deactivate_dealer(
    State(state): State<Arc<AppConfig>>,
    Path(dealer_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    require_privileged(&user)?;

    let dealer = DealerService::new(&state)
        .deactivate_dealer(dealer_id, token)
        .await
        .map_err(map_dealer_error)?;

    Ok(Json(json!({
        "success": true,
        "dealer": dealer,
        "message": "Dealer deactivated"
    })))
}

#[axum::debug_handler]
pub async fn resend_invitation(
    State(state): State<Arc<AppConfig>>,
    Path(invitation_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    require_privileged(&user)?;

    let invitation = InvitationService::new(&state)
        .resend_invitation(invitation_id, token)
        .await
        .map_err(map_dealer_error)?;

    Ok(Json(json!({
        "success": true,
        "invitation": invitation,
        "message": "Invitation resent"
    })))
}

#[axum::debug_handler]
pub async fn cancel_invitation(
    State(state): State<Arc<AppConfig>>,
    Path(invitation_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    require_privileged(&user)?;

    let invitation = InvitationService::new(&state)
        .cancel_invitation(invitation_id, token)
        .await
        .map_err(map_dealer_error)?;

    Ok(Json(json!({
        "success": true,
        "invitation": invitation,
        "message": "Invitation cancelled"
    })))
}

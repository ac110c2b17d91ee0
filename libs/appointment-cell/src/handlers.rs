// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentError, AppointmentListParams};
use crate::services::filter::status_counts;
use crate::services::schedule::ScheduleService;

fn map_appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::Unauthorized => {
            AppError::Auth("Not authorized to view this appointment".to_string())
        }
        AppointmentError::ValidationError(msg) => AppError::BadRequest(msg),
        AppointmentError::PlatformError(msg) => AppError::ExternalService(msg),
    }
}

// Dealers only see their own schedule; staff and admin may scope to any
// dealer through the query string.
fn resolve_dealer_scope(user: &User, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
    let is_privileged = matches!(user.role.as_deref(), Some("admin") | Some("staff"));
    if is_privileged {
        return Ok(requested);
    }

    let own_id = Uuid::parse_str(&user.id)
        .map_err(|_| AppError::Auth("Dealer identity is not a valid id".to_string()))?;

    match requested {
        Some(id) if id != own_id => Err(AppError::Auth(
            "Not authorized to view another dealer's appointments".to_string(),
        )),
        _ => Ok(Some(own_id)),
    }
}

/// List appointments through the dashboard pipeline: fetch, count, filter
/// by status, sort, and slice the requested page.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(mut params): Query<AppointmentListParams>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    params.dealer_id = resolve_dealer_scope(&user, params.dealer_id)?;

    let service = ScheduleService::new(&state);
    let appointments = service
        .fetch_appointments(&params, token)
        .await
        .map_err(map_appointment_error)?;

    let page = ScheduleService::build_page(appointments, &params);

    Ok(Json(json!(page)))
}

/// Status filter index on its own, for views that render the counts
/// without a page of rows.
#[axum::debug_handler]
pub async fn get_appointment_counts(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(mut params): Query<AppointmentListParams>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    params.dealer_id = resolve_dealer_scope(&user, params.dealer_id)?;

    let service = ScheduleService::new(&state);
    let appointments = service
        .fetch_appointments(&params, token)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "status_counts": status_counts(&appointments)
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    let service = ScheduleService::new(&state);
    let appointment = service
        .get_appointment(appointment_id, token)
        .await
        .map_err(map_appointment_error)?;

    let is_own = appointment.dealer_id.to_string() == user.id;
    let is_privileged = matches!(user.role.as_deref(), Some("admin") | Some("staff"));

    if !is_own && !is_privileged {
        return Err(AppError::Auth("Not authorized to view this appointment".to_string()));
    }

    Ok(Json(json!(appointment)))
}

// libs/reporting-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ReportError, ReportQuery};
use crate::services::reports::ReportService;

fn map_report_error(e: ReportError) -> AppError {
    match e {
        ReportError::ValidationError(msg) => AppError::BadRequest(msg),
        ReportError::PlatformError(msg) => AppError::ExternalService(msg),
    }
}

/// Per-period sales/bids/customers series for the dashboard charts.
#[axum::debug_handler]
pub async fn get_dashboard_report(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    tracing::debug!("Dashboard report requested by {}", user.id);

    let report = ReportService::new(&state)
        .dashboard_report(&query, token)
        .await
        .map_err(map_report_error)?;

    Ok(Json(json!(report)))
}

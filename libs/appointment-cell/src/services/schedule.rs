use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::platform::PlatformClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentListParams, AppointmentPage, StatusFilter,
};
use crate::services::filter::{filter_by_status, status_counts};
use crate::services::paging::{pagination_range, DEFAULT_SIBLING_COUNT};
use crate::services::sort::sort_appointments;

const DEFAULT_PER_PAGE: u32 = 10;

/// Fetches dealer appointments from the platform store and derives the
/// filtered/sorted/paged views the dashboard renders.
pub struct ScheduleService {
    platform: PlatformClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    pub async fn fetch_appointments(
        &self,
        params: &AppointmentListParams,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut path = String::from("/rest/v1/appointments?select=*&order=starts_at.asc");

        if let Some(dealer_id) = params.dealer_id {
            path.push_str(&format!("&dealer_id=eq.{}", dealer_id));
        }
        if let Some(from) = params.from_date {
            path.push_str(&format!("&starts_at=gte.{}", from.to_rfc3339()));
        }
        if let Some(to) = params.to_date {
            path.push_str(&format!("&starts_at=lte.{}", to.to_rfc3339()));
        }

        debug!("Fetching appointments: {}", path);

        self.platform
            .request::<Vec<Appointment>>(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AppointmentError::PlatformError(e.to_string()))
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}&select=*", appointment_id);

        let mut rows: Vec<Appointment> = self
            .platform
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AppointmentError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(rows.remove(0))
    }

    /// Run the listing pipeline over fetched records: status counts from
    /// the full list, then filter, sort (identity fallback on unknown
    /// keys), and slice the requested page.
    pub fn build_page(appointments: Vec<Appointment>, params: &AppointmentListParams) -> AppointmentPage {
        let counts = status_counts(&appointments);

        let status = params.status.unwrap_or(StatusFilter::All);
        let filtered = filter_by_status(&appointments, status);

        let sorted = match params.sort.as_deref() {
            Some(key) => sort_appointments(&filtered, key),
            None => filtered,
        };

        let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
        let total_count = sorted.len();
        let total_pages = (total_count as u32).div_ceil(per_page);

        // Out-of-range page requests clamp instead of erroring, matching
        // the no-op click semantics of the control.
        let page = params.page.unwrap_or(1).clamp(1, total_pages.max(1));

        let start = ((page - 1) * per_page) as usize;
        let page_slice: Vec<Appointment> = sorted
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        let sibling_count = params.sibling_count.unwrap_or(DEFAULT_SIBLING_COUNT);

        AppointmentPage {
            appointments: page_slice,
            page,
            per_page,
            total_count,
            total_pages,
            page_items: pagination_range(page, total_pages, sibling_count),
            status_counts: counts,
        }
    }
}

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::platform::PlatformClient;

use crate::models::{DashboardReport, Granularity, ReportError, ReportPoint, ReportQuery};

/// Relays per-period dashboard aggregates from the platform store. The
/// store owns the bucketing; this service validates the window and hands
/// the series through unchanged.
pub struct ReportService {
    platform: PlatformClient,
}

impl ReportService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    fn validate(query: &ReportQuery) -> Result<(), ReportError> {
        if query.from > query.to {
            return Err(ReportError::ValidationError(
                "Report window start must not be after its end".to_string(),
            ));
        }
        Ok(())
    }

    async fn fetch_series(
        &self,
        metric: &str,
        query: &ReportQuery,
        auth_token: &str,
    ) -> Result<Vec<ReportPoint>, ReportError> {
        let granularity = query.granularity.unwrap_or(Granularity::Day);
        let body = json!({
            "metric": metric,
            "from": query.from.to_rfc3339(),
            "to": query.to.to_rfc3339(),
            "granularity": granularity.to_string()
        });

        debug!("Fetching {} series at {} granularity", metric, granularity);

        self.platform
            .request(
                Method::POST,
                "/rest/v1/rpc/dashboard_series",
                Some(auth_token),
                Some(body),
            )
            .await
            .map_err(|e| ReportError::PlatformError(e.to_string()))
    }

    pub async fn dashboard_report(
        &self,
        query: &ReportQuery,
        auth_token: &str,
    ) -> Result<DashboardReport, ReportError> {
        Self::validate(query)?;

        let (sales, bids, customers) = tokio::try_join!(
            self.fetch_series("sales", query, auth_token),
            self.fetch_series("bids", query, auth_token),
            self.fetch_series("customers", query, auth_token),
        )?;

        Ok(DashboardReport {
            sales,
            bids,
            customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn inverted_window_is_rejected() {
        let query = ReportQuery {
            from: Utc.with_ymd_and_hms(2026, 8, 31, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            granularity: None,
        };

        assert!(matches!(
            ReportService::validate(&query),
            Err(ReportError::ValidationError(_))
        ));
    }

    #[test]
    fn equal_bounds_are_a_valid_window() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 15, 0, 0, 0).unwrap();
        let query = ReportQuery {
            from: instant,
            to: instant,
            granularity: Some(Granularity::Month),
        };

        assert!(ReportService::validate(&query).is_ok());
    }
}

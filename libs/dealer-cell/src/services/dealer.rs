use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::platform::PlatformClient;

use crate::models::{Dealer, DealerError, DeactivationWarning};

pub struct DealerService {
    platform: PlatformClient,
}

impl DealerService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    pub async fn get_dealer(
        &self,
        dealer_id: Uuid,
        auth_token: &str,
    ) -> Result<Dealer, DealerError> {
        let path = format!("/rest/v1/dealers?id=eq.{}&select=*", dealer_id);

        let mut rows: Vec<Dealer> = self
            .platform
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(DealerError::NotFound);
        }
        Ok(rows.remove(0))
    }

    /// Summarize what deactivating a dealer would cut off, without
    /// performing it.
    pub async fn deactivation_warning(
        &self,
        dealer_id: Uuid,
        auth_token: &str,
    ) -> Result<DeactivationWarning, DealerError> {
        let appointments_path = format!(
            "/rest/v1/appointments?dealer_id=eq.{}&status=in.(pending,confirmed)&select=id",
            dealer_id
        );
        let invitations_path = format!(
            "/rest/v1/dealer_invitations?dealer_id=eq.{}&status=eq.pending&select=id",
            dealer_id
        );

        let open_appointments: Vec<Value> = self
            .platform
            .request(Method::GET, &appointments_path, Some(auth_token), None)
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        let pending_invitations: Vec<Value> = self
            .platform
            .request(Method::GET, &invitations_path, Some(auth_token), None)
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        debug!(
            "Dealer {} has {} open appointments, {} pending invitations",
            dealer_id,
            open_appointments.len(),
            pending_invitations.len()
        );

        Ok(DeactivationWarning {
            dealer_id,
            open_appointments: open_appointments.len(),
            pending_invitations: pending_invitations.len(),
        })
    }

    pub async fn deactivate_dealer(
        &self,
        dealer_id: Uuid,
        auth_token: &str,
    ) -> Result<Dealer, DealerError> {
        let path = format!("/rest/v1/dealers?id=eq.{}", dealer_id);
        let body = json!({
            "status": "inactive",
            "updated_at": Utc::now().to_rfc3339()
        });

        let mut rows: Vec<Dealer> = self
            .platform
            .request(Method::PATCH, &path, Some(auth_token), Some(body))
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(DealerError::NotFound);
        }

        info!("Dealer {} deactivated", dealer_id);
        Ok(rows.remove(0))
    }
}

use chrono::{Duration, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::platform::PlatformClient;

use crate::models::{DealerError, Invitation, InvitationStatus};

/// Invitation lifecycle against the platform store: resend with a fresh
/// expiry, cancel while still pending.
pub struct InvitationService {
    platform: PlatformClient,
    invite_ttl_hours: i64,
}

impl InvitationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
            invite_ttl_hours: config.invite_ttl_hours,
        }
    }

    pub async fn get_invitation(
        &self,
        invitation_id: Uuid,
        auth_token: &str,
    ) -> Result<Invitation, DealerError> {
        let path = format!("/rest/v1/dealer_invitations?id=eq.{}&select=*", invitation_id);

        let mut rows: Vec<Invitation> = self
            .platform
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(DealerError::InvitationNotFound);
        }
        Ok(rows.remove(0))
    }

    /// Re-issue a pending or lapsed invitation with a fresh expiry.
    /// Accepted and cancelled invitations cannot be resent.
    pub async fn resend_invitation(
        &self,
        invitation_id: Uuid,
        auth_token: &str,
    ) -> Result<Invitation, DealerError> {
        let invitation = self.get_invitation(invitation_id, auth_token).await?;

        match invitation.effective_status() {
            InvitationStatus::Pending | InvitationStatus::Expired => {}
            status => return Err(DealerError::InvalidStatusTransition(status)),
        }

        let new_expiry = Utc::now() + Duration::hours(self.invite_ttl_hours);
        debug!(
            "Resending invitation {} with expiry {}",
            invitation_id, new_expiry
        );

        let path = format!("/rest/v1/dealer_invitations?id=eq.{}", invitation_id);
        let body = json!({
            "status": "pending",
            "expires_at": new_expiry.to_rfc3339(),
            "updated_at": Utc::now().to_rfc3339()
        });

        let mut rows: Vec<Invitation> = self
            .platform
            .request(Method::PATCH, &path, Some(auth_token), Some(body))
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(DealerError::InvitationNotFound);
        }

        info!("Invitation {} resent", invitation_id);
        Ok(rows.remove(0))
    }

    /// Cancel a pending invitation. Cancelling one that is already
    /// cancelled is a no-op; accepted invitations cannot be cancelled.
    pub async fn cancel_invitation(
        &self,
        invitation_id: Uuid,
        auth_token: &str,
    ) -> Result<Invitation, DealerError> {
        let invitation = self.get_invitation(invitation_id, auth_token).await?;

        match invitation.status {
            InvitationStatus::Cancelled => return Ok(invitation),
            InvitationStatus::Accepted => {
                return Err(DealerError::InvalidStatusTransition(invitation.status))
            }
            InvitationStatus::Pending | InvitationStatus::Expired => {}
        }

        let path = format!("/rest/v1/dealer_invitations?id=eq.{}", invitation_id);
        let body = json!({
            "status": "cancelled",
            "updated_at": Utc::now().to_rfc3339()
        });

        let mut rows: Vec<Invitation> = self
            .platform
            .request(Method::PATCH, &path, Some(auth_token), Some(body))
            .await
            .map_err(|e| DealerError::PlatformError(e.to_string()))?;

        if rows.is_empty() {
            return Err(DealerError::InvitationNotFound);
        }

        info!("Invitation {} cancelled", invitation_id);
        Ok(rows.remove(0))
    }
}

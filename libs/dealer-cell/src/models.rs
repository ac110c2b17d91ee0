// libs/dealer-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// DEALER MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: DealerStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DealerStatus {
    Active,
    Inactive,
    PendingInvite,
}

impl fmt::Display for DealerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealerStatus::Active => write!(f, "active"),
            DealerStatus::Inactive => write!(f, "inactive"),
            DealerStatus::PendingInvite => write!(f, "pending_invite"),
        }
    }
}

// ==============================================================================
// INVITATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn is_expired(&self) -> bool {
        self.status == InvitationStatus::Expired || Utc::now() > self.expires_at
    }

    /// Status with lapsed pending invitations reported as expired, the
    /// way the invitation list renders them.
    pub fn effective_status(&self) -> InvitationStatus {
        if self.status == InvitationStatus::Pending && Utc::now() > self.expires_at {
            InvitationStatus::Expired
        } else {
            self.status
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Cancelled,
    Expired,
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Accepted => write!(f, "accepted"),
            InvitationStatus::Cancelled => write!(f, "cancelled"),
            InvitationStatus::Expired => write!(f, "expired"),
        }
    }
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// What a dealer loses on deactivation, surfaced before the action runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivationWarning {
    pub dealer_id: Uuid,
    pub open_appointments: usize,
    pub pending_invitations: usize,
}

impl DeactivationWarning {
    pub fn has_open_work(&self) -> bool {
        self.open_appointments > 0 || self.pending_invitations > 0
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DealerError {
    #[error("Dealer not found")]
    NotFound,

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Invitation cannot be modified in current status: {0}")]
    InvalidStatusTransition(InvitationStatus),

    #[error("Unauthorized access to dealer records")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Platform store error: {0}")]
    PlatformError(String),
}

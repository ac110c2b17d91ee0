// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A dealer appointment as fetched from the platform store. Records are
/// immutable once fetched; listing views only ever re-derive filtered and
/// sorted copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub dealer_name: String,
    pub dealer_contact: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub meeting_type: MeetingType,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Scheduled end, falling back to start + duration when the store has
    /// no explicit end timestamp.
    pub fn scheduled_end_time(&self) -> DateTime<Utc> {
        self.ends_at
            .unwrap_or_else(|| self.starts_at + chrono::Duration::minutes(self.duration_minutes as i64))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    #[serde(alias = "in-person", alias = "onsite")]
    InPerson,
    Video,
    Phone,
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingType::InPerson => write!(f, "in_person"),
            MeetingType::Video => write!(f, "video"),
            MeetingType::Phone => write!(f, "phone"),
        }
    }
}

// ==============================================================================
// FILTER / SORT STATE
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    All,
    Pending,
    Confirmed,
    Cancelled,
}

impl StatusFilter {
    pub const ALL_VALUES: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Confirmed,
        StatusFilter::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Confirmed => "Confirmed",
            StatusFilter::Cancelled => "Cancelled",
        }
    }

    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == AppointmentStatus::Pending,
            StatusFilter::Confirmed => status == AppointmentStatus::Confirmed,
            StatusFilter::Cancelled => status == AppointmentStatus::Cancelled,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Pending => write!(f, "pending"),
            StatusFilter::Confirmed => write!(f, "confirmed"),
            StatusFilter::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One entry of the status filter index shown above the appointment list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCount {
    pub value: StatusFilter,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAsc,
    DateDesc,
    DealerAsc,
    DealerDesc,
    StatusAsc,
    StatusDesc,
    DurationAsc,
    DurationDesc,
}

impl SortKey {
    /// Parse a sort key from the query string. Both snake and kebab forms
    /// are accepted; anything else is None and the caller falls back to
    /// input order.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date_asc" | "date-asc" => Some(SortKey::DateAsc),
            "date_desc" | "date-desc" => Some(SortKey::DateDesc),
            "dealer_asc" | "dealer-asc" => Some(SortKey::DealerAsc),
            "dealer_desc" | "dealer-desc" => Some(SortKey::DealerDesc),
            "status_asc" | "status-asc" => Some(SortKey::StatusAsc),
            "status_desc" | "status-desc" => Some(SortKey::StatusDesc),
            "duration_asc" | "duration-asc" => Some(SortKey::DurationAsc),
            "duration_desc" | "duration-desc" => Some(SortKey::DurationDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SortKey::DateAsc => "date_asc",
            SortKey::DateDesc => "date_desc",
            SortKey::DealerAsc => "dealer_asc",
            SortKey::DealerDesc => "dealer_desc",
            SortKey::StatusAsc => "status_asc",
            SortKey::StatusDesc => "status_desc",
            SortKey::DurationAsc => "duration_asc",
            SortKey::DurationDesc => "duration_desc",
        };
        write!(f, "{}", value)
    }
}

// ==============================================================================
// PAGINATION MODELS
// ==============================================================================

/// A rendered pagination marker: a concrete page link or an elided range.
/// Serializes as the page number itself, or the string "ellipsis".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageItem::Page(page) => serializer.serialize_u32(*page),
            PageItem::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentListParams {
    pub dealer_id: Option<Uuid>,
    pub status: Option<StatusFilter>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sibling_count: Option<u32>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

/// One page of the dashboard appointment list, with everything the list
/// view renders around it.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentPage {
    pub appointments: Vec<Appointment>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: usize,
    pub total_pages: u32,
    pub page_items: Vec<PageItem>,
    pub status_counts: Vec<StatusCount>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Unauthorized access to appointment")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Platform store error: {0}")]
    PlatformError(String),
}

//! Work log domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::work_log;
use crate::models::attachment::{AttachmentItem, PhotoItem};

/// Attendance status for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Full working day.
    Worked,
    /// Day off. Sales counters are forced to zero.
    Off,
    /// Half working day.
    HalfDay,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worked => "worked",
            Self::Off => "off",
            Self::HalfDay => "half_day",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "worked" => Some(Self::Worked),
            "off" => Some(Self::Off),
            "half_day" => Some(Self::HalfDay),
            _ => None,
        }
    }

    /// Whether this status counts as a day with attendance.
    pub fn is_work_day(&self) -> bool {
        matches!(self, Self::Worked | Self::HalfDay)
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for the date-keyed upsert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WorkLogUpsertRequest {
    pub work_date: NaiveDate,
    pub status: WorkStatus,
    #[serde(default)]
    pub sales_count: i64,
    #[serde(default)]
    pub sales_amount: i64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for patching today's sales counters.
///
/// At least one field must be present; absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatchTodaySalesRequest {
    #[serde(default)]
    pub sales_count: Option<i64>,
    #[serde(default)]
    pub sales_amount: Option<i64>,
}

/// A single work log.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkLogResponse {
    pub id: i64,
    pub work_date: NaiveDate,
    pub status: WorkStatus,
    pub sales_count: i64,
    pub sales_amount: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<work_log::Model> for WorkLogResponse {
    fn from(m: work_log::Model) -> Self {
        // Stored statuses are constrained by a DB CHECK; anything else is a bug
        // surfaced as Off rather than a panic.
        let status = WorkStatus::parse(&m.status).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown stored work status '{}' on work log {}; treating as off",
                m.status,
                m.id
            );
            WorkStatus::Off
        });
        Self {
            id: m.id,
            work_date: m.work_date,
            status,
            sales_count: m.sales_count,
            sales_amount: m.sales_amount,
            note: m.note,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// A work log together with its attachments.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkLogDetailResponse {
    #[serde(flatten)]
    pub work_log: WorkLogResponse,
    pub attachments: Vec<AttachmentItem>,
}

/// Today's work log with presigned download URLs per attachment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodayDetailResponse {
    #[serde(flatten)]
    pub work_log: WorkLogResponse,
    pub attachments: Vec<PhotoItem>,
}

/// Aggregate sales across all work logs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TotalSalesResponse {
    pub total_sales_amount: i64,
}

/// Summary of the current Monday to Sunday window.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekSummaryResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub work_days: i64,
    pub sales_amount_sum: i64,
    pub photo_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_status_round_trip() {
        for status in [WorkStatus::Worked, WorkStatus::Off, WorkStatus::HalfDay] {
            assert_eq!(WorkStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(WorkStatus::parse("vacation"), None);
    }

    #[test]
    fn test_work_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&WorkStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        let parsed: WorkStatus = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(parsed, WorkStatus::Off);
    }

    #[test]
    fn test_is_work_day() {
        assert!(WorkStatus::Worked.is_work_day());
        assert!(WorkStatus::HalfDay.is_work_day());
        assert!(!WorkStatus::Off.is_work_day());
    }

    #[test]
    fn test_upsert_request_counter_defaults() {
        let req: WorkLogUpsertRequest =
            serde_json::from_str(r#"{"work_date":"2024-01-10","status":"worked"}"#).unwrap();
        assert_eq!(req.sales_count, 0);
        assert_eq!(req.sales_amount, 0);
        assert!(req.note.is_none());
    }

    #[test]
    fn test_patch_request_accepts_partial_payload() {
        let req: PatchTodaySalesRequest = serde_json::from_str(r#"{"sales_count":5}"#).unwrap();
        assert_eq!(req.sales_count, Some(5));
        assert_eq!(req.sales_amount, None);
    }

    #[test]
    fn test_unrecognized_stored_status_falls_back_to_off() {
        let model = work_log::Model {
            id: 1,
            work_date: "2024-01-10".parse().unwrap(),
            status: "vacation".to_string(),
            sales_count: 0,
            sales_amount: 0,
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = WorkLogResponse::from(model);
        assert_eq!(response.status, WorkStatus::Off);
    }
}

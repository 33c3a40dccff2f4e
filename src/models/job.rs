//! Job domain models and DTOs (legacy payment-tracking workflow).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::job;

/// Payment status of a job. Once paid, never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Unpaid,
    Paid,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Paid => "PAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UNPAID" => Some(Self::Unpaid),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single job.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobResponse {
    pub id: i64,
    pub work_date: NaiveDate,
    pub company_name: String,
    pub site_name: String,
    pub amount: i64,
    pub status: JobStatus,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<job::Model> for JobResponse {
    fn from(m: job::Model) -> Self {
        let status = JobStatus::parse(&m.status).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown stored job status '{}' on job {}; treating as unpaid",
                m.status,
                m.id
            );
            JobStatus::Unpaid
        });
        Self {
            id: m.id,
            work_date: m.work_date,
            company_name: m.company_name,
            site_name: m.site_name,
            amount: m.amount,
            status,
            memo: m.memo,
            created_at: m.created_at,
        }
    }
}

/// Sum of unpaid job amounts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnpaidSummaryResponse {
    pub total_amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_round_trip() {
        for status in [JobStatus::Unpaid, JobStatus::Paid] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("paid"), None);
    }

    #[test]
    fn test_job_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Unpaid).unwrap(),
            "\"UNPAID\""
        );
    }
}

//! Database queries for jobs (legacy payment-tracking workflow).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::job::{self, ActiveModel, Entity as Job};
use crate::error::{AppError, AppResult};
use crate::models::JobStatus;

impl super::DbPool {
    /// Get a job by ID.
    pub async fn get_job_by_id(&self, id: i64) -> AppResult<Option<job::Model>> {
        let result = Job::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get job: {}", e)))?;

        Ok(result)
    }

    /// List all jobs.
    pub async fn list_jobs(&self) -> AppResult<Vec<job::Model>> {
        let result = Job::find()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list jobs: {}", e)))?;

        Ok(result)
    }

    /// List unpaid jobs, oldest work date first.
    pub async fn list_unpaid_jobs(&self) -> AppResult<Vec<job::Model>> {
        let result = Job::find()
            .filter(job::Column::Status.eq(JobStatus::Unpaid.as_str()))
            .order_by_asc(job::Column::WorkDate)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list unpaid jobs: {}", e)))?;

        Ok(result)
    }

    /// Update a job's payment status.
    pub async fn update_job_status(&self, id: i64, status: JobStatus) -> AppResult<job::Model> {
        let model = ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_string()),
            ..Default::default()
        };

        let result = model
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update job status: {}", e)))?;

        Ok(result)
    }

    /// Sum amounts of unpaid jobs, 0 if none.
    pub async fn sum_unpaid_amount(&self) -> AppResult<i64> {
        // Same rationale as sum_sales_amount: avoid NUMERIC decode from SUM(BIGINT).
        let amounts: Vec<i64> = Job::find()
            .select_only()
            .column(job::Column::Amount)
            .filter(job::Column::Status.eq(JobStatus::Unpaid.as_str()))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to sum unpaid amounts: {}", e)))?;

        Ok(amounts.into_iter().sum())
    }
}

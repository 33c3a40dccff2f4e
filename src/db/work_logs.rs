//! Database queries for work logs.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::work_log::{self, ActiveModel, Entity as WorkLog};
use crate::error::{AppError, AppResult};
use crate::models::WorkStatus;

impl super::DbPool {
    /// Insert a new work log.
    ///
    /// Timestamps are left unset so the database defaults assign them.
    pub async fn insert_work_log(
        &self,
        work_date: NaiveDate,
        status: WorkStatus,
        sales_count: i64,
        sales_amount: i64,
        note: Option<String>,
    ) -> AppResult<work_log::Model> {
        let model = ActiveModel {
            work_date: Set(work_date),
            status: Set(status.as_str().to_string()),
            sales_count: Set(sales_count),
            sales_amount: Set(sales_amount),
            note: Set(note),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert work log: {}", e)))?;

        Ok(result)
    }

    /// Overwrite the mutable fields of an existing work log.
    ///
    /// updated_at is refreshed by the database trigger, not set here.
    pub async fn update_work_log(
        &self,
        existing: work_log::Model,
        status: WorkStatus,
        sales_count: i64,
        sales_amount: i64,
        note: Option<String>,
    ) -> AppResult<work_log::Model> {
        let model = ActiveModel {
            id: Set(existing.id),
            status: Set(status.as_str().to_string()),
            sales_count: Set(sales_count),
            sales_amount: Set(sales_amount),
            note: Set(note),
            ..Default::default()
        };

        let result = model
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update work log: {}", e)))?;

        Ok(result)
    }

    /// Update only the sales counters of an existing work log.
    pub async fn update_work_log_sales(
        &self,
        id: i64,
        sales_count: i64,
        sales_amount: i64,
    ) -> AppResult<work_log::Model> {
        let model = ActiveModel {
            id: Set(id),
            sales_count: Set(sales_count),
            sales_amount: Set(sales_amount),
            ..Default::default()
        };

        let result = model
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update work log sales: {}", e)))?;

        Ok(result)
    }

    /// Get a work log by ID.
    pub async fn get_work_log_by_id(&self, id: i64) -> AppResult<Option<work_log::Model>> {
        let result = WorkLog::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get work log: {}", e)))?;

        Ok(result)
    }

    /// Get the work log for a calendar date, if any.
    pub async fn get_work_log_by_date(
        &self,
        work_date: NaiveDate,
    ) -> AppResult<Option<work_log::Model>> {
        let result = WorkLog::find()
            .filter(work_log::Column::WorkDate.eq(work_date))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get work log by date: {}", e)))?;

        Ok(result)
    }

    /// List all work logs, newest date first.
    pub async fn list_work_logs(&self) -> AppResult<Vec<work_log::Model>> {
        let result = WorkLog::find()
            .order_by_desc(work_log::Column::WorkDate)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list work logs: {}", e)))?;

        Ok(result)
    }

    /// List work logs with the given status, oldest date first.
    pub async fn list_work_logs_by_status(
        &self,
        status: WorkStatus,
    ) -> AppResult<Vec<work_log::Model>> {
        let result = WorkLog::find()
            .filter(work_log::Column::Status.eq(status.as_str()))
            .order_by_asc(work_log::Column::WorkDate)
            .all(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to list work logs by status: {}", e))
            })?;

        Ok(result)
    }

    /// List work logs whose date falls within [start, end] inclusive.
    pub async fn list_work_logs_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<work_log::Model>> {
        let result = WorkLog::find()
            .filter(work_log::Column::WorkDate.gte(start))
            .filter(work_log::Column::WorkDate.lte(end))
            .order_by_asc(work_log::Column::WorkDate)
            .all(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to list work logs in range: {}", e))
            })?;

        Ok(result)
    }

    /// Sum sales_amount over all work logs, 0 if none.
    pub async fn sum_sales_amount(&self) -> AppResult<i64> {
        // SUM(BIGINT) decodes as NUMERIC on Postgres; fetch the column and
        // sum here to keep the decode on plain i64.
        let amounts: Vec<i64> = WorkLog::find()
            .select_only()
            .column(work_log::Column::SalesAmount)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to sum sales amount: {}", e)))?;

        Ok(amounts.into_iter().sum())
    }
}

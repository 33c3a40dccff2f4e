//! Database queries for attachments.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::attachment::{self, ActiveModel, Entity as Attachment};
use crate::error::{AppError, AppResult};

impl super::DbPool {
    /// Insert a new attachment. created_at is assigned by the database.
    pub async fn insert_attachment(
        &self,
        work_log_id: i64,
        file_key: String,
        original_filename: String,
    ) -> AppResult<attachment::Model> {
        let model = ActiveModel {
            work_log_id: Set(work_log_id),
            file_key: Set(file_key),
            original_filename: Set(original_filename),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert attachment: {}", e)))?;

        Ok(result)
    }

    /// Find an attachment by its (work_log_id, file_key) idempotency key.
    pub async fn find_attachment_by_key(
        &self,
        work_log_id: i64,
        file_key: &str,
    ) -> AppResult<Option<attachment::Model>> {
        let result = Attachment::find()
            .filter(attachment::Column::WorkLogId.eq(work_log_id))
            .filter(attachment::Column::FileKey.eq(file_key))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find attachment: {}", e)))?;

        Ok(result)
    }

    /// Count attachments for a work log.
    pub async fn count_attachments(&self, work_log_id: i64) -> AppResult<u64> {
        let count = Attachment::find()
            .filter(attachment::Column::WorkLogId.eq(work_log_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count attachments: {}", e)))?;

        Ok(count)
    }

    /// List attachments for a work log, oldest first.
    pub async fn list_attachments(&self, work_log_id: i64) -> AppResult<Vec<attachment::Model>> {
        let result = Attachment::find()
            .filter(attachment::Column::WorkLogId.eq(work_log_id))
            .order_by_asc(attachment::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list attachments: {}", e)))?;

        Ok(result)
    }

    /// Work log ids among the given set that have at least one attachment.
    pub async fn work_log_ids_with_attachments(
        &self,
        work_log_ids: &[i64],
    ) -> AppResult<Vec<i64>> {
        if work_log_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = Attachment::find()
            .select_only()
            .column(attachment::Column::WorkLogId)
            .distinct()
            .filter(attachment::Column::WorkLogId.is_in(work_log_ids.iter().copied()))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to query attachment work logs: {}", e))
            })?;

        Ok(ids)
    }
}

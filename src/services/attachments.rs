//! Attachment policy: presigned upload/download issuance, idempotent
//! confirmation, and the per-day photo cap.

use std::time::Duration;

use tracing::info;

use crate::db::DbPool;
use crate::entity::attachment;
use crate::error::{AppError, AppResult};
use crate::models::attachment::DEFAULT_DOWNLOAD_TTL_SECS;
use crate::models::{
    ConfirmRequest, PhotoItem, PresignDownloadRequest, PresignDownloadResponse,
    PresignTodayRequest, PresignTodayResponse, PresignUploadRequest, PresignUploadResponse,
    WorkStatus,
};
use crate::services::work_logs;
use crate::services::Storage;

/// Maximum photos per work log.
pub const MAX_ATTACHMENTS_PER_DAY: u64 = 3;

/// TTL for upload URLs issued against an explicit work log.
const UPLOAD_TTL_SECS: u64 = 60;

/// TTL for upload URLs issued against today's log (mobile flow allows
/// slower captures).
const TODAY_UPLOAD_TTL_SECS: u64 = 600;

/// Issue a presigned upload URL for an existing work log.
///
/// No Attachment row is created here; the client calls confirm after the
/// PUT succeeds.
pub async fn presign_upload(
    pool: &DbPool,
    storage: &Storage,
    req: PresignUploadRequest,
) -> AppResult<PresignUploadResponse> {
    let work_log = pool
        .get_work_log_by_id(req.work_log_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("WorkLog {}", req.work_log_id)))?;

    let file_key = Storage::build_file_key(work_log.work_date, &req.filename);

    let upload_url = storage
        .presign_put(
            &file_key,
            &req.content_type,
            Duration::from_secs(UPLOAD_TTL_SECS),
        )
        .await?;

    info!(
        "Presigned upload: work_log_id={}, file_key={}",
        req.work_log_id, file_key
    );

    Ok(PresignUploadResponse {
        upload_url,
        file_key,
    })
}

/// Issue a presigned upload URL against today's log, creating it if needed.
/// Rejected while today's status is Off.
pub async fn presign_upload_today(
    pool: &DbPool,
    storage: &Storage,
    req: PresignTodayRequest,
) -> AppResult<PresignTodayResponse> {
    let work_log = work_logs::ensure_today(pool).await?;

    if WorkStatus::parse(&work_log.status) == Some(WorkStatus::Off) {
        return Err(AppError::DomainRule(
            "Photos cannot be uploaded on an off day. Change the status to worked first."
                .to_string(),
        ));
    }

    let file_key = Storage::build_file_key(work_log.work_date, &req.filename);

    let upload_url = storage
        .presign_put(
            &file_key,
            &req.content_type,
            Duration::from_secs(TODAY_UPLOAD_TTL_SECS),
        )
        .await?;

    Ok(PresignTodayResponse {
        upload_url,
        file_key,
        work_log_id: work_log.id,
    })
}

/// Record an uploaded object as an attachment of a work log.
///
/// Idempotent on (work_log_id, file_key): a repeated confirm returns the
/// existing row. A new attachment is rejected once the log holds
/// MAX_ATTACHMENTS_PER_DAY photos.
pub async fn confirm(pool: &DbPool, req: ConfirmRequest) -> AppResult<attachment::Model> {
    pool.get_work_log_by_id(req.work_log_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("WorkLog {}", req.work_log_id)))?;

    if let Some(existing) = pool
        .find_attachment_by_key(req.work_log_id, &req.file_key)
        .await?
    {
        info!(
            "Attachment already confirmed: id={}, work_log_id={}",
            existing.id, existing.work_log_id
        );
        return Ok(existing);
    }

    let current_count = pool.count_attachments(req.work_log_id).await?;
    if current_count >= MAX_ATTACHMENTS_PER_DAY {
        return Err(AppError::LimitExceeded(
            "Up to 3 photos can be attached per day".to_string(),
        ));
    }

    let created = pool
        .insert_attachment(req.work_log_id, req.file_key, req.original_filename)
        .await?;

    info!(
        "Attachment confirmed: id={}, work_log_id={}, file_key={}",
        created.id, created.work_log_id, created.file_key
    );

    Ok(created)
}

/// Issue a presigned download URL for a stored object.
pub async fn presign_download(
    storage: &Storage,
    req: PresignDownloadRequest,
) -> AppResult<PresignDownloadResponse> {
    if req.file_key.is_empty() {
        return Err(AppError::InvalidInput("file_key is required".to_string()));
    }

    let download_url = storage
        .presign_get(
            &req.file_key,
            Duration::from_secs(req.expires_in),
            req.response_content_type.as_deref(),
            req.as_attachment,
            req.download_filename.as_deref(),
        )
        .await?;

    Ok(PresignDownloadResponse {
        download_url,
        file_key: req.file_key,
    })
}

/// Enrich attachments with inline-view download URLs (default TTL).
pub async fn photo_items(
    storage: &Storage,
    attachments: Vec<attachment::Model>,
) -> AppResult<Vec<PhotoItem>> {
    let mut items = Vec::with_capacity(attachments.len());

    for attachment in attachments {
        let download_url = storage
            .presign_get(
                &attachment.file_key,
                Duration::from_secs(DEFAULT_DOWNLOAD_TTL_SECS),
                None,
                false,
                None,
            )
            .await?;

        items.push(PhotoItem {
            attachment_id: attachment.id,
            original_filename: attachment.original_filename,
            file_key: attachment.file_key,
            download_url,
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use crate::entity::work_log;

    const FILE_KEY: &str = "work-logs/2024-01-10/abc123.jpg";

    fn log_row(id: i64, status: WorkStatus) -> work_log::Model {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        work_log::Model {
            id,
            work_date: "2024-01-10".parse().unwrap(),
            status: status.as_str().to_string(),
            sales_count: 0,
            sales_amount: 0,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn attachment_row(id: i64, work_log_id: i64) -> attachment::Model {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        attachment::Model {
            id,
            work_log_id,
            file_key: FILE_KEY.to_string(),
            original_filename: "photo.jpg".to_string(),
            created_at: now,
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::from(n))])
    }

    fn confirm_request(work_log_id: i64) -> ConfirmRequest {
        ConfirmRequest {
            work_log_id,
            file_key: FILE_KEY.to_string(),
            original_filename: "photo.jpg".to_string(),
        }
    }

    fn drain_sql(pool: &DbPool) -> String {
        format!("{:?}", pool.connection().clone().into_transaction_log())
    }

    #[tokio::test]
    async fn test_confirm_missing_work_log_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<work_log::Model>::new()])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let err = confirm(&pool, confirm_request(42)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_confirm_repeat_returns_existing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![log_row(7, WorkStatus::Worked)]])
            .append_query_results([vec![attachment_row(11, 7)]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = confirm(&pool, confirm_request(7)).await.unwrap();

        // The row confirmed earlier comes back; no second row is written.
        assert_eq!(result.id, 11);
        assert_eq!(result.file_key, FILE_KEY);
        assert!(!drain_sql(&pool).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_confirm_inserts_new_attachment_under_cap() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![log_row(7, WorkStatus::Worked)]])
            .append_query_results([Vec::<attachment::Model>::new()])
            .append_query_results([[count_row(2)]])
            .append_query_results([vec![attachment_row(12, 7)]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = confirm(&pool, confirm_request(7)).await.unwrap();

        assert_eq!(result.id, 12);
        assert!(drain_sql(&pool).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_confirm_rejects_photo_beyond_cap() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![log_row(7, WorkStatus::Worked)]])
            .append_query_results([Vec::<attachment::Model>::new()])
            .append_query_results([[count_row(3)]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let err = confirm(&pool, confirm_request(7)).await.unwrap_err();

        assert!(matches!(err, AppError::LimitExceeded(_)));
        assert!(!drain_sql(&pool).contains("INSERT"));
    }
}

//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Work Log Server",
        version = "0.1.0",
        description = "API server for daily work logs (attendance, sales counters, notes) with presigned photo attachments"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Work log endpoints
        api::work_logs::list_work_logs,
        api::work_logs::get_today,
        api::work_logs::get_today_detail,
        api::work_logs::patch_today_sales,
        api::work_logs::get_today_photos,
        api::work_logs::list_by_status,
        api::work_logs::upsert_work_log,
        api::work_logs::get_total_sales_amount,
        api::work_logs::get_week_summary,
        api::work_logs::get_work_log,
        api::work_logs::get_work_log_detail,
        // Attachment endpoints
        api::attachments::presign_upload,
        api::attachments::presign_upload_today,
        api::attachments::presign_download,
        api::attachments::confirm,
        // Job endpoints
        api::jobs::list_jobs,
        api::jobs::list_unpaid_jobs,
        api::jobs::mark_job_paid,
        api::jobs::get_unpaid_summary,
        // User endpoints
        api::users::list_users,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Work logs
            models::WorkStatus,
            models::WorkLogUpsertRequest,
            models::PatchTodaySalesRequest,
            models::WorkLogResponse,
            models::WorkLogDetailResponse,
            models::TodayDetailResponse,
            models::TotalSalesResponse,
            models::WeekSummaryResponse,
            // Attachments
            models::AttachmentItem,
            models::AttachmentResponse,
            models::PhotoItem,
            models::PresignUploadRequest,
            models::PresignUploadResponse,
            models::PresignTodayRequest,
            models::PresignTodayResponse,
            models::PresignDownloadRequest,
            models::PresignDownloadResponse,
            models::ConfirmRequest,
            // Jobs
            models::JobStatus,
            models::JobResponse,
            models::UnpaidSummaryResponse,
            // Users
            models::UserResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "WorkLogs", description = "Daily work log records"),
        (name = "Attachments", description = "Photo upload workflow via presigned URLs"),
        (name = "Jobs", description = "Legacy payment tracking"),
        (name = "Users", description = "User listing"),
    )
)]
pub struct ApiDoc;

//! Domain models and request/response DTOs.

pub mod attachment;
pub mod job;
pub mod user;
pub mod work_log;

// Re-export commonly used types
pub use attachment::{
    AttachmentItem, AttachmentResponse, ConfirmRequest, PhotoItem, PresignDownloadRequest,
    PresignDownloadResponse, PresignTodayRequest, PresignTodayResponse, PresignUploadRequest,
    PresignUploadResponse,
};
pub use job::{JobResponse, JobStatus, UnpaidSummaryResponse};
pub use user::UserResponse;
pub use work_log::{
    PatchTodaySalesRequest, TodayDetailResponse, TotalSalesResponse, WeekSummaryResponse,
    WorkLogDetailResponse, WorkLogResponse, WorkLogUpsertRequest, WorkStatus,
};

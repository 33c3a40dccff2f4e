//! Attachment DTOs for the presign/confirm workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::attachment;

/// Default TTL in seconds for presigned download URLs.
pub const DEFAULT_DOWNLOAD_TTL_SECS: u64 = 600;

/// Request a presigned upload URL for an existing work log.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PresignUploadRequest {
    pub work_log_id: i64,
    pub filename: String,
    /// e.g. "image/jpeg"
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresignUploadResponse {
    pub upload_url: String,
    pub file_key: String,
}

/// Request a presigned upload URL against today's auto-created log.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PresignTodayRequest {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresignTodayResponse {
    pub upload_url: String,
    pub file_key: String,
    pub work_log_id: i64,
}

/// Request a presigned download URL for a stored object.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PresignDownloadRequest {
    pub file_key: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    /// Content-type hint for in-browser viewing, e.g. "image/png".
    #[serde(default)]
    pub response_content_type: Option<String>,
    /// Force a download disposition instead of inline display.
    #[serde(default)]
    pub as_attachment: bool,
    #[serde(default)]
    pub download_filename: Option<String>,
}

fn default_expires_in() -> u64 {
    DEFAULT_DOWNLOAD_TTL_SECS
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresignDownloadResponse {
    pub download_url: String,
    pub file_key: String,
}

/// Confirm that an object was uploaded and attach it to a work log.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    pub work_log_id: i64,
    pub file_key: String,
    pub original_filename: String,
}

/// A confirmed attachment row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttachmentResponse {
    pub id: i64,
    pub work_log_id: i64,
    pub file_key: String,
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
}

impl From<attachment::Model> for AttachmentResponse {
    fn from(m: attachment::Model) -> Self {
        Self {
            id: m.id,
            work_log_id: m.work_log_id,
            file_key: m.file_key,
            original_filename: m.original_filename,
            created_at: m.created_at,
        }
    }
}

/// Attachment line item within a work log detail.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttachmentItem {
    pub id: i64,
    pub file_key: String,
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
}

impl From<attachment::Model> for AttachmentItem {
    fn from(m: attachment::Model) -> Self {
        Self {
            id: m.id,
            file_key: m.file_key,
            original_filename: m.original_filename,
            created_at: m.created_at,
        }
    }
}

/// Attachment enriched with a presigned download URL.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoItem {
    pub attachment_id: i64,
    pub original_filename: String,
    pub file_key: String,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presign_download_request_defaults() {
        let req: PresignDownloadRequest =
            serde_json::from_str(r#"{"file_key":"work-logs/2024-01-10/abc.png"}"#).unwrap();
        assert_eq!(req.expires_in, DEFAULT_DOWNLOAD_TTL_SECS);
        assert!(!req.as_attachment);
        assert!(req.response_content_type.is_none());
        assert!(req.download_filename.is_none());
    }
}

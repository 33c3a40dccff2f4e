//! S3 storage gateway for photo attachments.
//!
//! Builds storage keys and issues presigned upload/download URLs.
//! Supports both AWS S3 and MinIO for development. The actual byte
//! transfer happens directly between the client and the object store.

use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::{AppError, AppResult};

/// Key prefix for all work log photos.
const KEY_PREFIX: &str = "work-logs";

/// Extension used when the uploaded filename has none.
const DEFAULT_EXTENSION: &str = "jpg";

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &S3Config) -> AppResult<Self> {
        let credentials =
            Credentials::new(&config.access_key, &config.secret_key, None, None, "worklog");

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        // Use custom endpoint for MinIO in development
        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let s3_config = s3_config_builder.build();
        let client = Client::from_conf(s3_config);

        let storage = Self {
            client,
            bucket: config.bucket.clone(),
        };

        // Verify bucket exists or create it
        storage.ensure_bucket_exists().await?;

        info!("S3 storage initialized: bucket={}", config.bucket);

        Ok(storage)
    }

    /// Ensure the bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                info!("S3 bucket '{}' exists", self.bucket);
                Ok(())
            }
            Err(e) => {
                // Check if it's a "not found" error
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", self.bucket);
                    self.client
                        .create_bucket()
                        .bucket(&self.bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    info!("S3 bucket '{}' created", self.bucket);
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        self.bucket, service_error
                    )))
                }
            }
        }
    }

    /// Build a storage key for a photo uploaded against a work log.
    ///
    /// Format: work-logs/{ISO date}/{random token}.{ext}. The extension is
    /// preserved from the filename, lowercased, defaulting to jpg.
    pub fn build_file_key(work_date: NaiveDate, filename: &str) -> String {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let token = Uuid::new_v4().simple();
        format!("{}/{}/{}.{}", KEY_PREFIX, work_date, token, ext)
    }

    /// The basename of a storage key, used as the fallback download filename.
    pub fn key_basename(file_key: &str) -> &str {
        file_key.rsplit('/').next().unwrap_or(file_key)
    }

    /// Issue a presigned PUT URL scoped to a key and content type.
    pub async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::Storage(format!("Invalid presign expiry: {}", e)))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to presign upload: {}", e)))?;

        Ok(presigned.uri().to_string())
    }

    /// Issue a presigned GET URL for a stored object.
    ///
    /// `response_content_type` hints the browser content type; when
    /// `as_attachment` is set the store is instructed to force a download
    /// disposition using `download_filename` or the key's basename.
    pub async fn presign_get(
        &self,
        key: &str,
        expires_in: Duration,
        response_content_type: Option<&str>,
        as_attachment: bool,
        download_filename: Option<&str>,
    ) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::Storage(format!("Invalid presign expiry: {}", e)))?;

        let mut request = self.client.get_object().bucket(&self.bucket).key(key);

        if let Some(content_type) = response_content_type {
            request = request.response_content_type(content_type);
        }

        if as_attachment {
            let filename = download_filename.unwrap_or_else(|| Self::key_basename(key));
            request =
                request.response_content_disposition(format!("attachment; filename=\"{}\"", filename));
        }

        let presigned = request
            .presigned(presigning)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to presign download: {}", e)))?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_file_key_preserves_extension() {
        let key = Storage::build_file_key(date("2024-01-10"), "a.PNG");
        assert!(key.starts_with("work-logs/2024-01-10/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_build_file_key_defaults_to_jpg() {
        let key = Storage::build_file_key(date("2024-01-10"), "photo");
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_build_file_key_is_unique_per_call() {
        let a = Storage::build_file_key(date("2024-01-10"), "a.png");
        let b = Storage::build_file_key(date("2024-01-10"), "a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_file_key_uses_last_extension() {
        let key = Storage::build_file_key(date("2024-01-10"), "archive.tar.gz");
        assert!(key.ends_with(".gz"));
    }

    #[test]
    fn test_key_basename() {
        assert_eq!(
            Storage::key_basename("work-logs/2024-01-10/abc123.png"),
            "abc123.png"
        );
        assert_eq!(Storage::key_basename("plain.png"), "plain.png");
    }
}

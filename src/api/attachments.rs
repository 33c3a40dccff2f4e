//! Attachment API handlers: presign, confirm, presign-get.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    AttachmentResponse, ConfirmRequest, PresignDownloadRequest, PresignDownloadResponse,
    PresignTodayRequest, PresignTodayResponse, PresignUploadRequest, PresignUploadResponse,
};
use crate::services::{Storage, attachments};

/// Issue a presigned upload URL for an existing work log.
#[utoipa::path(
    post,
    path = "/attachments/presign",
    tag = "Attachments",
    request_body = PresignUploadRequest,
    responses(
        (status = 200, description = "Presigned upload URL", body = PresignUploadResponse),
        (status = 404, description = "Work log not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn presign_upload(
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    body: web::Json<PresignUploadRequest>,
) -> AppResult<HttpResponse> {
    let response = attachments::presign_upload(&pool, &storage, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Issue a presigned upload URL against today's auto-created log.
#[utoipa::path(
    post,
    path = "/attachments/presign/today",
    tag = "Attachments",
    request_body = PresignTodayRequest,
    responses(
        (status = 200, description = "Presigned upload URL", body = PresignTodayResponse),
        (status = 400, description = "Today is an off day", body = crate::error::ErrorResponse),
    )
)]
pub async fn presign_upload_today(
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    body: web::Json<PresignTodayRequest>,
) -> AppResult<HttpResponse> {
    let response = attachments::presign_upload_today(&pool, &storage, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Issue a presigned download URL for a stored object.
#[utoipa::path(
    post,
    path = "/attachments/presign-get",
    tag = "Attachments",
    request_body = PresignDownloadRequest,
    responses(
        (status = 200, description = "Presigned download URL", body = PresignDownloadResponse),
        (status = 400, description = "Missing file key", body = crate::error::ErrorResponse),
    )
)]
pub async fn presign_download(
    storage: web::Data<Storage>,
    body: web::Json<PresignDownloadRequest>,
) -> AppResult<HttpResponse> {
    let response = attachments::presign_download(&storage, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Confirm an uploaded object as an attachment. Idempotent per
/// (work_log_id, file_key).
#[utoipa::path(
    post,
    path = "/attachments/confirm",
    tag = "Attachments",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Attachment record", body = AttachmentResponse),
        (status = 400, description = "Photo cap reached", body = crate::error::ErrorResponse),
        (status = 404, description = "Work log not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn confirm(
    pool: web::Data<DbPool>,
    body: web::Json<ConfirmRequest>,
) -> AppResult<HttpResponse> {
    let attachment = attachments::confirm(&pool, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AttachmentResponse::from(attachment)))
}

/// Configure attachment routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/attachments/presign").route(web::post().to(presign_upload)))
        .service(
            web::resource("/attachments/presign/today")
                .route(web::post().to(presign_upload_today)),
        )
        .service(
            web::resource("/attachments/presign-get").route(web::post().to(presign_download)),
        )
        .service(web::resource("/attachments/confirm").route(web::post().to(confirm)));
}

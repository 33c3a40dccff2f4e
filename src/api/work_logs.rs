//! Work log API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AttachmentItem, PatchTodaySalesRequest, TodayDetailResponse, TotalSalesResponse,
    WeekSummaryResponse, WorkLogDetailResponse, WorkLogResponse, WorkLogUpsertRequest, WorkStatus,
};
use crate::services::{Storage, attachments, work_logs};

/// List all work logs, newest date first.
#[utoipa::path(
    get,
    path = "/work-logs",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "List of work logs", body = [WorkLogResponse]),
    )
)]
pub async fn list_work_logs(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let logs = pool.list_work_logs().await?;
    let response: Vec<WorkLogResponse> = logs.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Ensure and return today's work log with its attachments.
#[utoipa::path(
    get,
    path = "/work-logs/today",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "Today's work log", body = WorkLogDetailResponse),
    )
)]
pub async fn get_today(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let log = work_logs::ensure_today(&pool).await?;
    let attachments = pool.list_attachments(log.id).await?;

    let response = WorkLogDetailResponse {
        work_log: log.into(),
        attachments: attachments.into_iter().map(AttachmentItem::from).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Today's work log plus attachments with presigned download URLs.
#[utoipa::path(
    get,
    path = "/work-logs/today/detail",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "Today's work log with download URLs", body = TodayDetailResponse),
    )
)]
pub async fn get_today_detail(
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    let log = work_logs::ensure_today(&pool).await?;
    let rows = pool.list_attachments(log.id).await?;
    let photos = attachments::photo_items(&storage, rows).await?;

    let response = TodayDetailResponse {
        work_log: log.into(),
        attachments: photos,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Patch today's sales counters.
#[utoipa::path(
    patch,
    path = "/work-logs/today/sales",
    tag = "WorkLogs",
    request_body = PatchTodaySalesRequest,
    responses(
        (status = 200, description = "Updated work log", body = WorkLogResponse),
        (status = 400, description = "Off day or invalid payload", body = crate::error::ErrorResponse),
    )
)]
pub async fn patch_today_sales(
    pool: web::Data<DbPool>,
    body: web::Json<PatchTodaySalesRequest>,
) -> AppResult<HttpResponse> {
    let log = work_logs::patch_today_sales(&pool, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(WorkLogResponse::from(log)))
}

/// Today's photos with download URLs. Empty when no log exists for today
/// or today is an off day.
#[utoipa::path(
    get,
    path = "/work-logs/today/photos",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "Today's photos", body = [crate::models::PhotoItem]),
    )
)]
pub async fn get_today_photos(
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    let log = match pool.get_work_log_by_date(work_logs::today()).await? {
        Some(log) => log,
        None => return Ok(HttpResponse::Ok().json(Vec::<crate::models::PhotoItem>::new())),
    };

    if WorkStatus::parse(&log.status) == Some(WorkStatus::Off) {
        return Ok(HttpResponse::Ok().json(Vec::<crate::models::PhotoItem>::new()));
    }

    let rows = pool.list_attachments(log.id).await?;
    let photos = attachments::photo_items(&storage, rows).await?;

    Ok(HttpResponse::Ok().json(photos))
}

/// List work logs filtered by status, oldest date first.
#[utoipa::path(
    get,
    path = "/work-logs/status/{status}",
    tag = "WorkLogs",
    params(
        ("status" = String, Path, description = "worked, off, or half_day")
    ),
    responses(
        (status = 200, description = "Matching work logs", body = [WorkLogResponse]),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_by_status(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let status = WorkStatus::parse(&raw)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown work status '{}'", raw)))?;

    let logs = pool.list_work_logs_by_status(status).await?;
    let response: Vec<WorkLogResponse> = logs.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Create or overwrite the work log for a date.
#[utoipa::path(
    post,
    path = "/work-logs/upsert",
    tag = "WorkLogs",
    request_body = WorkLogUpsertRequest,
    responses(
        (status = 200, description = "Resulting work log", body = WorkLogResponse),
        (status = 400, description = "Negative counters", body = crate::error::ErrorResponse),
    )
)]
pub async fn upsert_work_log(
    pool: web::Data<DbPool>,
    body: web::Json<WorkLogUpsertRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let log = work_logs::create_or_update(
        &pool,
        req.work_date,
        req.status,
        req.sales_count,
        req.sales_amount,
        req.note,
    )
    .await?;

    Ok(HttpResponse::Ok().json(WorkLogResponse::from(log)))
}

/// Total sales amount across all work logs.
#[utoipa::path(
    get,
    path = "/work-logs/summary/total-sales-amount",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "Aggregate sales", body = TotalSalesResponse),
    )
)]
pub async fn get_total_sales_amount(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let total_sales_amount = pool.sum_sales_amount().await?;

    Ok(HttpResponse::Ok().json(TotalSalesResponse { total_sales_amount }))
}

/// Summary of the current Monday to Sunday window.
#[utoipa::path(
    get,
    path = "/work-logs/week-summary",
    tag = "WorkLogs",
    responses(
        (status = 200, description = "Week summary", body = WeekSummaryResponse),
    )
)]
pub async fn get_week_summary(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let summary = work_logs::week_summary(&pool).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Get a single work log by ID.
#[utoipa::path(
    get,
    path = "/work-logs/{id}",
    tag = "WorkLogs",
    params(
        ("id" = i64, Path, description = "Work log ID")
    ),
    responses(
        (status = 200, description = "Work log", body = WorkLogResponse),
        (status = 404, description = "Work log not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_work_log(pool: web::Data<DbPool>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let log = pool
        .get_work_log_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("WorkLog {}", id)))?;

    Ok(HttpResponse::Ok().json(WorkLogResponse::from(log)))
}

/// Get a work log together with its attachments.
#[utoipa::path(
    get,
    path = "/work-logs/{id}/detail",
    tag = "WorkLogs",
    params(
        ("id" = i64, Path, description = "Work log ID")
    ),
    responses(
        (status = 200, description = "Work log with attachments", body = WorkLogDetailResponse),
        (status = 404, description = "Work log not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_work_log_detail(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let log = pool
        .get_work_log_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("WorkLog {}", id)))?;

    let attachments = pool.list_attachments(log.id).await?;

    let response = WorkLogDetailResponse {
        work_log: log.into(),
        attachments: attachments.into_iter().map(AttachmentItem::from).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure work log routes.
///
/// Literal paths are registered before the {id} captures so that
/// /work-logs/today is never swallowed by /work-logs/{id}.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/work-logs").route(web::get().to(list_work_logs)))
        .service(web::resource("/work-logs/today").route(web::get().to(get_today)))
        .service(web::resource("/work-logs/today/detail").route(web::get().to(get_today_detail)))
        .service(
            web::resource("/work-logs/today/sales").route(web::patch().to(patch_today_sales)),
        )
        .service(web::resource("/work-logs/today/photos").route(web::get().to(get_today_photos)))
        .service(web::resource("/work-logs/status/{status}").route(web::get().to(list_by_status)))
        .service(web::resource("/work-logs/upsert").route(web::post().to(upsert_work_log)))
        .service(
            web::resource("/work-logs/summary/total-sales-amount")
                .route(web::get().to(get_total_sales_amount)),
        )
        .service(web::resource("/work-logs/week-summary").route(web::get().to(get_week_summary)))
        .service(web::resource("/work-logs/{id}").route(web::get().to(get_work_log)))
        .service(
            web::resource("/work-logs/{id}/detail").route(web::get().to(get_work_log_detail)),
        );
}

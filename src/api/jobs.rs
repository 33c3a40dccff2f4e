//! Job API handlers (legacy payment-tracking workflow).

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{JobResponse, JobStatus, UnpaidSummaryResponse};

/// List all jobs.
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "List of jobs", body = [JobResponse]),
    )
)]
pub async fn list_jobs(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let jobs = pool.list_jobs().await?;
    let response: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// List unpaid jobs, oldest work date first.
#[utoipa::path(
    get,
    path = "/jobs/unpaid",
    tag = "Jobs",
    responses(
        (status = 200, description = "Unpaid jobs", body = [JobResponse]),
    )
)]
pub async fn list_unpaid_jobs(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let jobs = pool.list_unpaid_jobs().await?;
    let response: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Mark a job as paid. Idempotent: a job already paid is returned
/// unchanged, and paid never reverts to unpaid.
#[utoipa::path(
    patch,
    path = "/jobs/{id}/mark_paid",
    tag = "Jobs",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job after marking", body = JobResponse),
        (status = 404, description = "Job not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn mark_job_paid(pool: web::Data<DbPool>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let job = pool
        .get_job_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {}", id)))?;

    if JobStatus::parse(&job.status) == Some(JobStatus::Paid) {
        return Ok(HttpResponse::Ok().json(JobResponse::from(job)));
    }

    let updated = pool.update_job_status(id, JobStatus::Paid).await?;
    info!("Job marked paid: id={}", id);

    Ok(HttpResponse::Ok().json(JobResponse::from(updated)))
}

/// Sum of unpaid job amounts.
#[utoipa::path(
    get,
    path = "/jobs/unpaid/summary",
    tag = "Jobs",
    responses(
        (status = 200, description = "Unpaid total", body = UnpaidSummaryResponse),
    )
)]
pub async fn get_unpaid_summary(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let total_amount = pool.sum_unpaid_amount().await?;

    Ok(HttpResponse::Ok().json(UnpaidSummaryResponse { total_amount }))
}

/// Configure job routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/jobs").route(web::get().to(list_jobs)))
        .service(web::resource("/jobs/unpaid").route(web::get().to(list_unpaid_jobs)))
        .service(
            web::resource("/jobs/unpaid/summary").route(web::get().to(get_unpaid_summary)),
        )
        .service(web::resource("/jobs/{id}/mark_paid").route(web::patch().to(mark_job_paid)));
}

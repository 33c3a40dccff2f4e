//! Work log policy: validation, date-keyed upsert, and today/week views.

use chrono::{Datelike, Days, FixedOffset, NaiveDate, Utc};
use tracing::info;

use crate::db::DbPool;
use crate::entity::work_log;
use crate::error::{AppError, AppResult};
use crate::models::{PatchTodaySalesRequest, WeekSummaryResponse, WorkStatus};

/// Fixed civil timezone for "today" (Asia/Seoul, UTC+9, no DST).
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Today's calendar date in the fixed service timezone.
pub fn today() -> NaiveDate {
    let kst = FixedOffset::east_opt(KST_OFFSET_SECS).expect("valid fixed offset");
    Utc::now().with_timezone(&kst).date_naive()
}

/// The Monday-to-Sunday window containing the given date.
pub fn week_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    let start = date - Days::new(days_from_monday);
    let end = start + Days::new(6);
    (start, end)
}

fn validate_non_negative(value: i64, field_name: &str) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::InvalidInput(format!(
            "{} must be zero or greater",
            field_name
        )));
    }
    Ok(())
}

/// Sales counters after the off-day rule: an off day always stores zeros,
/// regardless of the submitted values.
fn normalized_counters(status: WorkStatus, sales_count: i64, sales_amount: i64) -> (i64, i64) {
    if status == WorkStatus::Off {
        (0, 0)
    } else {
        (sales_count, sales_amount)
    }
}

/// Create or overwrite the work log for a calendar date.
///
/// The upsert is keyed on work_date, not the surrogate id: an existing log
/// for the date has all mutable fields replaced in place.
pub async fn create_or_update(
    pool: &DbPool,
    work_date: NaiveDate,
    status: WorkStatus,
    sales_count: i64,
    sales_amount: i64,
    note: Option<String>,
) -> AppResult<work_log::Model> {
    validate_non_negative(sales_count, "sales_count")?;
    validate_non_negative(sales_amount, "sales_amount")?;

    let (sales_count, sales_amount) = normalized_counters(status, sales_count, sales_amount);

    if let Some(existing) = pool.get_work_log_by_date(work_date).await? {
        info!("Updating work log: id={}, work_date={}", existing.id, work_date);
        return pool
            .update_work_log(existing, status, sales_count, sales_amount, note)
            .await;
    }

    let created = pool
        .insert_work_log(work_date, status, sales_count, sales_amount, note)
        .await?;
    info!("Created work log: id={}, work_date={}", created.id, work_date);

    Ok(created)
}

/// Return today's work log, creating an Off log with zero counters if the
/// date has none yet. Repeated calls return the same row.
pub async fn ensure_today(pool: &DbPool) -> AppResult<work_log::Model> {
    let date = today();

    if let Some(existing) = pool.get_work_log_by_date(date).await? {
        return Ok(existing);
    }

    let created = pool
        .insert_work_log(date, WorkStatus::Off, 0, 0, None)
        .await?;
    info!("Auto-created today's work log: id={}, work_date={}", created.id, date);

    Ok(created)
}

/// Apply a partial sales update to today's log.
///
/// Absent fields keep their stored values. Rejected on off days and on
/// payloads that provide nothing or negative values.
pub async fn patch_today_sales(
    pool: &DbPool,
    req: PatchTodaySalesRequest,
) -> AppResult<work_log::Model> {
    if req.sales_count.is_none() && req.sales_amount.is_none() {
        return Err(AppError::InvalidInput(
            "At least one of sales_count or sales_amount is required".to_string(),
        ));
    }

    if let Some(count) = req.sales_count {
        validate_non_negative(count, "sales_count")?;
    }
    if let Some(amount) = req.sales_amount {
        validate_non_negative(amount, "sales_amount")?;
    }

    let log = ensure_today(pool).await?;

    if WorkStatus::parse(&log.status) == Some(WorkStatus::Off) {
        return Err(AppError::DomainRule(
            "Cannot record sales on an off day".to_string(),
        ));
    }

    let sales_count = req.sales_count.unwrap_or(log.sales_count);
    let sales_amount = req.sales_amount.unwrap_or(log.sales_amount);

    pool.update_work_log_sales(log.id, sales_count, sales_amount)
        .await
}

/// Summarize the current Monday-to-Sunday window: attendance days, sales
/// total, and days with at least one photo.
pub async fn week_summary(pool: &DbPool) -> AppResult<WeekSummaryResponse> {
    let (week_start, week_end) = week_window(today());

    let logs = pool.list_work_logs_in_range(week_start, week_end).await?;

    let work_days = logs
        .iter()
        .filter(|l| {
            WorkStatus::parse(&l.status)
                .map(|s| s.is_work_day())
                .unwrap_or(false)
        })
        .count() as i64;

    let sales_amount_sum = logs.iter().map(|l| l.sales_amount).sum();

    let log_ids: Vec<i64> = logs.iter().map(|l| l.id).collect();
    let photo_days = pool.work_log_ids_with_attachments(&log_ids).await?.len() as i64;

    Ok(WeekSummaryResponse {
        week_start,
        week_end,
        work_days,
        sales_amount_sum,
        photo_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn log_row(
        id: i64,
        work_date: &str,
        status: WorkStatus,
        sales_count: i64,
        sales_amount: i64,
    ) -> work_log::Model {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        work_log::Model {
            id,
            work_date: date(work_date),
            status: status.as_str().to_string(),
            sales_count,
            sales_amount,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn drain_sql(pool: &DbPool) -> String {
        format!("{:?}", pool.connection().clone().into_transaction_log())
    }

    #[test]
    fn test_week_window_mid_week() {
        // 2024-01-10 is a Wednesday
        let (start, end) = week_window(date("2024-01-10"));
        assert_eq!(start, date("2024-01-08"));
        assert_eq!(end, date("2024-01-14"));
    }

    #[test]
    fn test_week_window_on_monday_and_sunday() {
        let (start, end) = week_window(date("2024-01-08"));
        assert_eq!(start, date("2024-01-08"));
        assert_eq!(end, date("2024-01-14"));

        let (start, end) = week_window(date("2024-01-14"));
        assert_eq!(start, date("2024-01-08"));
        assert_eq!(end, date("2024-01-14"));
    }

    #[test]
    fn test_week_window_spans_month_boundary() {
        // 2024-02-01 is a Thursday
        let (start, end) = week_window(date("2024-02-01"));
        assert_eq!(start, date("2024-01-29"));
        assert_eq!(end, date("2024-02-04"));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0, "sales_count").is_ok());
        assert!(validate_non_negative(10, "sales_count").is_ok());

        let err = validate_non_negative(-1, "sales_count").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("sales_count"));
    }

    #[test]
    fn test_off_day_forces_zero_counters() {
        assert_eq!(normalized_counters(WorkStatus::Off, 5, 50_000), (0, 0));
        assert_eq!(
            normalized_counters(WorkStatus::Worked, 5, 50_000),
            (5, 50_000)
        );
        assert_eq!(
            normalized_counters(WorkStatus::HalfDay, 2, 10_000),
            (2, 10_000)
        );
    }

    #[tokio::test]
    async fn test_upsert_new_date_inserts_once() {
        let created = log_row(1, "2024-01-10", WorkStatus::Worked, 2, 2_000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<work_log::Model>::new(), vec![created]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = create_or_update(
            &pool,
            date("2024-01-10"),
            WorkStatus::Worked,
            2,
            2_000,
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.id, 1);
        let sql = drain_sql(&pool);
        assert!(sql.contains("INSERT"));
        assert!(!sql.contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_upsert_existing_date_updates_in_place() {
        let existing = log_row(7, "2024-01-10", WorkStatus::Worked, 1, 1_000);
        let updated = log_row(7, "2024-01-10", WorkStatus::HalfDay, 2, 2_000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = create_or_update(
            &pool,
            date("2024-01-10"),
            WorkStatus::HalfDay,
            2,
            2_000,
            None,
        )
        .await
        .unwrap();

        // Same row is overwritten; no second row comes into existence.
        assert_eq!(result.id, 7);
        assert_eq!(result.status, "half_day");
        let sql = drain_sql(&pool);
        assert!(sql.contains("UPDATE"));
        assert!(!sql.contains("INSERT"));
    }

    #[tokio::test]
    async fn test_ensure_today_returns_existing_without_insert() {
        let existing = log_row(3, "2024-01-10", WorkStatus::Worked, 0, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let log = ensure_today(&pool).await.unwrap();

        assert_eq!(log.id, 3);
        assert!(!drain_sql(&pool).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_ensure_today_creates_off_log_when_missing() {
        let created = log_row(9, "2024-01-10", WorkStatus::Off, 0, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<work_log::Model>::new(), vec![created]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let log = ensure_today(&pool).await.unwrap();

        assert_eq!(log.status, "off");
        assert_eq!(log.sales_count, 0);
        assert!(drain_sql(&pool).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_patch_today_sales_rejected_on_off_day() {
        let off = log_row(4, "2024-01-10", WorkStatus::Off, 0, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![off]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let err = patch_today_sales(
            &pool,
            PatchTodaySalesRequest {
                sales_count: Some(1),
                sales_amount: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::DomainRule(_)));
    }

    #[tokio::test]
    async fn test_patch_today_sales_requires_a_field() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = DbPool::from_connection(db);

        let err = patch_today_sales(
            &pool,
            PatchTodaySalesRequest {
                sales_count: None,
                sales_amount: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_patch_today_sales_keeps_absent_field() {
        let existing = log_row(4, "2024-01-10", WorkStatus::Worked, 2, 7_777);
        let updated = log_row(4, "2024-01-10", WorkStatus::Worked, 5, 7_777);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = patch_today_sales(
            &pool,
            PatchTodaySalesRequest {
                sales_count: Some(5),
                sales_amount: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(result.sales_count, 5);
        // The stored amount is written back unchanged.
        assert!(drain_sql(&pool).contains("7777"));
    }
}

//! Migration: Create jobs table (legacy payment-tracking workflow).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE jobs (
                    id BIGSERIAL PRIMARY KEY,
                    work_date DATE NOT NULL,
                    company_name VARCHAR(255) NOT NULL,
                    site_name VARCHAR(255) NOT NULL,
                    amount BIGINT NOT NULL DEFAULT 0,

                    status VARCHAR(20) NOT NULL DEFAULT 'UNPAID'
                        CHECK (status IN ('UNPAID', 'PAID')),

                    memo TEXT,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for unpaid listing ordered by date
                CREATE INDEX idx_jobs_status_work_date ON jobs(status, work_date);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS jobs CASCADE;")
            .await?;

        Ok(())
    }
}

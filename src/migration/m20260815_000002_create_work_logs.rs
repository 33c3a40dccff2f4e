//! Migration: Create work_logs table.
//!
//! One row per calendar date. The unique index on work_date makes the
//! date-keyed upsert race-safe; timestamps are DB-assigned so the ORM
//! never sends them on insert.

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
                CREATE TABLE work_logs (
                    id BIGSERIAL PRIMARY KEY,
                    work_date DATE NOT NULL,

                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('worked', 'off', 'half_day')),

                    sales_count BIGINT NOT NULL DEFAULT 0
                        CHECK (sales_count >= 0),
                    sales_amount BIGINT NOT NULL DEFAULT 0
                        CHECK (sales_amount >= 0),

                    note TEXT,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Exactly one log per calendar date
                CREATE UNIQUE INDEX idx_work_logs_work_date ON work_logs(work_date);

                -- Index for status filtering
                CREATE INDEX idx_work_logs_status ON work_logs(status);

                -- Trigger to update updated_at
                CREATE TRIGGER update_work_logs_updated_at
                    BEFORE UPDATE ON work_logs
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_work_logs_updated_at ON work_logs;
                DROP TABLE IF EXISTS work_logs CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}

//! Migration: Create attachments table.
//!
//! The unique index on (work_log_id, file_key) backs the idempotent
//! confirm operation against concurrent duplicate inserts.

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
                CREATE TABLE attachments (
                    id BIGSERIAL PRIMARY KEY,
                    work_log_id BIGINT NOT NULL REFERENCES work_logs(id),

                    file_key VARCHAR(1024) NOT NULL,
                    original_filename VARCHAR(255) NOT NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for per-log listing
                CREATE INDEX idx_attachments_work_log_id ON attachments(work_log_id);

                -- Idempotency key for confirm
                CREATE UNIQUE INDEX idx_attachments_log_key
                    ON attachments(work_log_id, file_key);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS attachments CASCADE;")
            .await?;

        Ok(())
    }
}

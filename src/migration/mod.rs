//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_users;
mod m20260815_000002_create_work_logs;
mod m20260815_000003_create_attachments;
mod m20260815_000004_create_jobs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_users::Migration),
            Box::new(m20260815_000002_create_work_logs::Migration),
            Box::new(m20260815_000003_create_attachments::Migration),
            Box::new(m20260815_000004_create_jobs::Migration),
        ]
    }
}

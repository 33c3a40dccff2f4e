//! SeaORM entity definitions for PostgreSQL database.

pub mod attachment;
pub mod job;
pub mod user;
pub mod work_log;

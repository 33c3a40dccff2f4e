//! Business logic services.

pub mod attachments;
pub mod storage;
pub mod work_logs;

pub use storage::Storage;

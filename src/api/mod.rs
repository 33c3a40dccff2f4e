//! API endpoint modules.

pub mod attachments;
pub mod health;
pub mod jobs;
pub mod openapi;
pub mod users;
pub mod work_logs;

pub use attachments::configure_routes as configure_attachment_routes;
pub use health::configure_health_routes;
pub use jobs::configure_routes as configure_job_routes;
pub use openapi::ApiDoc;
pub use users::configure_routes as configure_user_routes;
pub use work_logs::configure_routes as configure_work_log_routes;

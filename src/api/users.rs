//! User API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::UserResponse;

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = [UserResponse]),
    )
)]
pub async fn list_users(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let users = pool.list_users().await?;
    let response: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users").route(web::get().to(list_users)));
}

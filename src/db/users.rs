//! Database queries for users.

use sea_orm::EntityTrait;

use crate::entity::user::{self, Entity as User};
use crate::error::{AppError, AppResult};

impl super::DbPool {
    /// List all users.
    pub async fn list_users(&self) -> AppResult<Vec<user::Model>> {
        let result = User::find()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list users: {}", e)))?;

        Ok(result)
    }
}

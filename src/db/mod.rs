//! Database module providing connection management and queries.

pub mod attachments;
pub mod jobs;
pub mod users;
pub mod work_logs;

use sea_orm::{Database, DatabaseConnection};

use crate::error::{AppError, AppResult};

/// Database connection pool wrapper around SeaORM's connection.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the given connection string.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let conn = Database::connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Wrap an already-built connection, used with MockDatabase in tests.
    #[cfg(test)]
    pub(crate) fn from_connection(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }
}

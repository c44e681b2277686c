use std::time::Duration;

use migration::migrate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Open the connection pool and bring the schema up to date.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(16)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .map_err(|e| AppError::config(format!("database connection failed: {e}")))?;
    info!(backend = ?db.get_database_backend(), "Database connected");

    migrate(&db)
        .await
        .map_err(|e| AppError::internal(format!("migrations failed: {e}")))?;

    Ok(db)
}

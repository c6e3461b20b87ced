use axum::{extract::Extension, http::StatusCode, Json};
use sqlx::SqlitePool;

use clips_api_structs::Status;
use tracing::{error, instrument};

/// Reports on the health of the web server.
#[instrument(skip(db_pool))]
pub async fn get(Extension(db_pool): Extension<SqlitePool>) -> Result<Json<Status>, StatusCode> {
    match db_pool.acquire().await {
        Ok(_conn) => Ok(Status {
            db_connections: db_pool.size(),
        }
        .into()),
        Err(err) => {
            error!("Database is unavailable: {:?}", err);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

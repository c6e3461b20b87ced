use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::{
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::Error;

pub(crate) mod handlers;
pub(crate) mod serialization;

pub fn create_router(db: SqlitePool) -> Router {
    Router::new()
        .route("/status/", get(handlers::status::get))
        .route(
            "/api/clips/",
            get(handlers::clip::get_all).post(handlers::clip::create),
        )
        .route(
            "/api/clips/:id/",
            get(handlers::clip::get)
                .put(handlers::clip::edit)
                .delete(handlers::clip::delete),
        )
        .route("/api/clips/:id/stream", get(handlers::clip::stream))
        .route("/api/clips/:id/stats", get(handlers::clip::stats))
        .fallback(handle_404)
        .layer(Extension(db))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!("request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "This isn't the endpoint you're looking for",
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::NotFound => (StatusCode::NOT_FOUND, "Clip not found".to_string()),
            Error::BadRequest => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::UnsupportedScheme(_) => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
            Error::Database(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The database is unavailable".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went oopsies".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

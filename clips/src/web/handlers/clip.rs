use axum::{
    extract::{Extension, Path, Query},
    response::Redirect,
    Json,
};
use clips_api_structs::{Clip, ClipPatch, ClipStats, ClipUpdated, ClipUpload, Clips};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::instrument;
use url::Url;

use crate::db;
use crate::web::serialization::clip_stats;

/// The longest clip name the API accepts; the column is a VARCHAR(200) and SQLite won't
/// enforce that on its own.
const NAME_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Maximum number of clips to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of clips to skip.
    #[serde(default)]
    pub offset: i64,
    /// Optional search term to filter clips.
    pub search: Option<String>,
}

fn default_limit() -> i64 {
    20
}

/// List clips known to the service, optionally filtered by a search term.
#[instrument(skip(db_pool))]
pub async fn get_all(
    Extension(db_pool): Extension<SqlitePool>,
    Query(params): Query<ListParams>,
) -> Result<Json<Clips>, crate::Error> {
    let mut conn = db_pool.acquire().await?;
    // An empty search term means no search at all.
    let clips = match params.search.as_deref() {
        Some(query) if !query.is_empty() => {
            db::search_clips(&mut conn, query, params.limit, params.offset).await?
        }
        _ => db::clips_list(&mut conn, params.limit, params.offset).await?,
    };
    let clips: Vec<Clip> = clips.into_iter().map(Into::into).collect();
    Ok(Clips {
        items: clips.len() as u64,
        clips,
    }
    .into())
}

/// Get a single clip by ID.
#[instrument(skip(db_pool))]
pub async fn get(
    Extension(db_pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Clip>, crate::Error> {
    let mut conn = db_pool.acquire().await?;
    let clip = db::get_clip(&mut conn, id)
        .await?
        .ok_or(crate::Error::NotFound)?;
    Ok(Json(clip.into()))
}

/// Create a new clip from a JSON body with its metadata.
#[instrument(skip(db_pool))]
pub async fn create(
    Extension(db_pool): Extension<SqlitePool>,
    Json(upload): Json<ClipUpload>,
) -> Result<Json<Clip>, crate::Error> {
    if upload.name.chars().count() > NAME_MAX_CHARS {
        return Err(crate::Error::BadRequest);
    }
    let mut conn = db_pool.acquire().await?;
    let clip = db::create_clip(&mut conn, upload).await?;
    Ok(Json(clip.into()))
}

/// Apply a partial update to a clip and report both the old and the new versions.
#[instrument(skip(db_pool))]
pub async fn edit(
    Extension(db_pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
    Json(patch): Json<ClipPatch>,
) -> Result<Json<ClipUpdated>, crate::Error> {
    if patch
        .name
        .as_ref()
        .is_some_and(|name| name.chars().count() > NAME_MAX_CHARS)
    {
        return Err(crate::Error::BadRequest);
    }

    let mut transaction = db_pool.begin().await?;
    let old_clip: Clip = db::get_clip(&mut transaction, id)
        .await?
        .ok_or(crate::Error::NotFound)?
        .into();
    db::update_clip(&mut transaction, id, &patch).await?;
    let new_clip: Clip = db::get_clip(&mut transaction, id)
        .await?
        .ok_or(crate::Error::NotFound)?
        .into();
    transaction.commit().await?;

    Ok(ClipUpdated { old_clip, new_clip }.into())
}

/// Remove a clip from the database.
#[instrument(skip(db_pool))]
pub async fn delete(
    Extension(db_pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Clip>, crate::Error> {
    let mut conn = db_pool.acquire().await?;
    let clip = db::get_clip(&mut conn, id)
        .await?
        .ok_or(crate::Error::NotFound)?;
    db::remove_clip(&mut conn, id).await?;
    Ok(Json(clip.into()))
}

/// Stream a clip by redirecting the player to its URL, counting the play on the way out.
///
/// The play is counted before the URL is inspected, so a clip with an unstreamable URL still
/// records the attempt.
#[instrument(skip(db_pool))]
pub async fn stream(
    Extension(db_pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Redirect, crate::Error> {
    let mut conn = db_pool.acquire().await?;
    let clip = db::get_clip(&mut conn, id)
        .await?
        .ok_or(crate::Error::NotFound)?;
    db::mark_played(&mut conn, id).await?;

    match Url::parse(&clip.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(Redirect::temporary(&clip.url))
        }
        Ok(url) => Err(crate::Error::UnsupportedScheme(url.scheme().to_string())),
        Err(_) => Err(crate::Error::UnsupportedScheme(String::new())),
    }
}

/// Get play statistics for a single clip.
#[instrument(skip(db_pool))]
pub async fn stats(
    Extension(db_pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ClipStats>, crate::Error> {
    let mut conn = db_pool.acquire().await?;
    let clip = db::get_clip(&mut conn, id)
        .await?
        .ok_or(crate::Error::NotFound)?;
    Ok(Json(clip_stats(clip)))
}

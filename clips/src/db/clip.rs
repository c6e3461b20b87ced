use chrono::NaiveDateTime;
use clips_api_structs::Clip as ApiClip;
use clips_api_structs::{ClipPatch, ClipUpload};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Representation of an audio clip in the database.
///
/// Clips reference audio by URL; the stream endpoint redirects players to it and keeps a
/// running play count.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Clip {
    /// The unique identifier for the clip and primary key for the table.
    pub id: i64,
    /// Name of the clip.
    pub name: String,
    /// URL of the audio file.
    pub url: String,
    /// A description of the clip for human consumption.
    pub description: Option<String>,
    /// Duration of the clip in seconds.
    pub duration: Option<i64>,
    /// Number of times the clip has been played.
    pub play_count: i64,
    /// Comma-separated tags for the clip.
    pub tags: Option<String>,
    /// The time when the clip was added to the database.
    pub created_at: NaiveDateTime,
    /// The time when the clip was last updated; partial updates do not touch this.
    pub updated_at: NaiveDateTime,
}

impl std::fmt::Display for Clip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Clip ID {}\n\tName: {}\n\tURL: {}\n\tPlays: {}\n",
            self.id, self.name, self.url, self.play_count
        )
    }
}

impl From<Clip> for ApiClip {
    fn from(clip: Clip) -> Self {
        Self {
            id: clip.id,
            name: clip.name,
            url: clip.url,
            description: clip.description,
            duration: clip.duration,
            play_count: clip.play_count,
            tags: clip.tags,
            created_at: clip.created_at,
            updated_at: clip.updated_at,
        }
    }
}

/// Add a clip from the metadata in a [`ClipUpload`].
///
/// The play count starts at 0 and both timestamps are set to the current time. The generated
/// primary key is captured from the insert itself.
#[instrument(skip_all)]
pub async fn create_clip(
    connection: &mut SqliteConnection,
    upload: ClipUpload,
) -> Result<Clip, crate::Error> {
    let now = chrono::Utc::now().naive_utc();
    let clip = sqlx::query_as::<_, Clip>(
        "
        INSERT INTO clips (name, url, description, duration, play_count, tags, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?, ?)
        RETURNING *
        ",
    )
    .bind(&upload.name)
    .bind(&upload.url)
    .bind(&upload.description)
    .bind(upload.duration)
    .bind(&upload.tags)
    .bind(now)
    .bind(now)
    .fetch_one(connection)
    .await?;
    Ok(clip)
}

/// List clips ordered by creation time, most recent first.
///
/// # Arguments
///
/// `connection` - The database connection to use when issuing the query.
///
/// `limit` - The maximum number of clips to return.
///
/// `offset` - The number of clips to skip.
#[instrument(skip(connection))]
pub async fn clips_list(
    connection: &mut SqliteConnection,
    limit: i64,
    offset: i64,
) -> Result<Vec<Clip>, crate::Error> {
    sqlx::query_as::<_, Clip>(
        "
        SELECT *
        FROM clips
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        ",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(connection)
    .await
    .map_err(crate::Error::Database)
}

/// Get a single clip by its primary key; a missing row is `None`, not an error.
#[instrument(skip(connection))]
pub async fn get_clip(
    connection: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Clip>, crate::Error> {
    Ok(sqlx::query_as::<_, Clip>(
        "
        SELECT *
        FROM clips
        WHERE clips.id = ?
        ",
    )
    .bind(id)
    .fetch_optional(connection)
    .await?)
}

/// Apply the fields set in a [`ClipPatch`] to a clip.
///
/// Unset fields are left alone, as is `updated_at`. A patch with no fields set issues no
/// query at all.
///
/// # Returns
///
/// A Result with the number of affected rows; 0 when the clip does not exist.
#[instrument(skip(connection))]
pub async fn update_clip(
    connection: &mut SqliteConnection,
    id: i64,
    patch: &ClipPatch,
) -> Result<u64, crate::Error> {
    if patch.is_empty() {
        return Ok(0);
    }

    let mut query = QueryBuilder::<Sqlite>::new("UPDATE clips SET ");
    let mut fields = query.separated(", ");
    if let Some(name) = &patch.name {
        fields.push("name = ").push_bind_unseparated(name);
    }
    if let Some(url) = &patch.url {
        fields.push("url = ").push_bind_unseparated(url);
    }
    if let Some(description) = &patch.description {
        fields.push("description = ").push_bind_unseparated(description);
    }
    if let Some(duration) = patch.duration {
        fields.push("duration = ").push_bind_unseparated(duration);
    }
    if let Some(tags) = &patch.tags {
        fields.push("tags = ").push_bind_unseparated(tags);
    }
    query.push(" WHERE id = ").push_bind(id);

    let updated = query.build().execute(connection).await?.rows_affected();
    Ok(updated)
}

/// Remove a clip from the database.
///
/// # Returns
///
/// A Result with the number of affected rows; deleting a clip that does not exist is a no-op.
#[instrument(skip(connection))]
pub async fn remove_clip(connection: &mut SqliteConnection, id: i64) -> Result<u64, crate::Error> {
    let deleted = sqlx::query(
        "
        DELETE FROM clips
        WHERE id = ?
        ",
    )
    .bind(id)
    .execute(connection)
    .await?
    .rows_affected();
    Ok(deleted)
}

/// Mark a clip as played by incrementing its play counter.
///
/// The increment happens in a single UPDATE so concurrent streams never lose a play.
///
/// # Returns
///
/// A Result with the number of affected rows; 0 when the clip does not exist.
#[instrument(skip(connection))]
pub async fn mark_played(connection: &mut SqliteConnection, id: i64) -> Result<u64, crate::Error> {
    let updated = sqlx::query(
        "
        UPDATE clips
        SET play_count = play_count + 1
        WHERE id = ?
        ",
    )
    .bind(id)
    .execute(connection)
    .await?
    .rows_affected();
    Ok(updated)
}

/// Find clips whose name, description, or tags contain the query as a substring,
/// case-insensitively. Results are ordered by play count, most played first.
#[instrument(skip(connection))]
pub async fn search_clips(
    connection: &mut SqliteConnection,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Clip>, crate::Error> {
    let pattern = format!("%{query}%");
    sqlx::query_as::<_, Clip>(
        "
        SELECT *
        FROM clips
        WHERE name LIKE ? OR description LIKE ? OR tags LIKE ?
        ORDER BY play_count DESC
        LIMIT ? OFFSET ?
        ",
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(connection)
    .await
    .map_err(crate::Error::Database)
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
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
    /// The time when the clip was last updated.
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Clips {
    pub items: u64,
    pub clips: Vec<Clip>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ClipUpload {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub tags: Option<String>,
}

/// A partial update; only fields that are set are applied.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub tags: Option<String>,
}

impl ClipPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.duration.is_none()
            && self.tags.is_none()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClipUpdated {
    /// The new clip.
    pub new_clip: Clip,
    /// The old clip.
    pub old_clip: Clip,
}

/// Statistics view of a clip; `genre` is derived from the tags.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClipStats {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i64>,
    pub play_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

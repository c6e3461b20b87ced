/// Defines public-facing structures used in the web API
use clips_api_structs::ClipStats;

use crate::db;

/// Build the statistics view of a clip.
///
/// The genre is the leading character of the tags string, or nothing when the clip has no
/// tags.
pub fn clip_stats(clip: db::Clip) -> ClipStats {
    ClipStats {
        id: clip.id,
        title: clip.name,
        description: clip.description,
        genre: clip
            .tags
            .as_deref()
            .and_then(|tags| tags.chars().next())
            .map(String::from),
        duration: clip.duration,
        play_count: clip.play_count,
        created_at: clip.created_at,
        updated_at: clip.updated_at,
    }
}

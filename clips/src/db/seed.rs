use clips_api_structs::ClipUpload;
use sqlx::SqliteConnection;
use tracing::{debug, info, instrument};

use super::{clips_list, create_clip};

/// Check whether the database contains no clips at all.
#[instrument(skip_all)]
pub async fn is_empty(connection: &mut SqliteConnection) -> Result<bool, crate::Error> {
    let clips = clips_list(connection, 1, 0).await?;
    Ok(clips.is_empty())
}

/// Insert the sample clip catalog, one clip at a time.
///
/// No uniqueness check is performed; seeding a database that already contains the catalog
/// duplicates it. Callers gate this on [`is_empty`].
#[instrument(skip_all)]
pub async fn seed(connection: &mut SqliteConnection) -> Result<(), crate::Error> {
    info!("Seeding database with sample clip data");

    let sample_clips = vec![
        ClipUpload {
            name: "Without Me".to_string(),
            description: Some("A song by Halsey".to_string()),
            url: "https://samplesongs.netlify.app/Without%20Me.mp3".to_string(),
            duration: Some(200),
            tags: Some("pop,song,halsey".to_string()),
        },
        ClipUpload {
            name: "Death Bed".to_string(),
            description: Some("A song by Powfu".to_string()),
            url: "https://samplesongs.netlify.app/Death%20Bed.mp3".to_string(),
            duration: Some(210),
            tags: Some("pop,song,powfu".to_string()),
        },
        ClipUpload {
            name: "Bad Liar".to_string(),
            description: Some("A song by Imagine Dragons".to_string()),
            url: "https://samplesongs.netlify.app/Bad%20Liar.mp3".to_string(),
            duration: Some(260),
            tags: Some("rock,song,imagine dragons".to_string()),
        },
        ClipUpload {
            name: "Faded".to_string(),
            description: Some("A song by Alan Walker".to_string()),
            url: "https://samplesongs.netlify.app/Faded.mp3".to_string(),
            duration: Some(212),
            tags: Some("electronic,song,alan walker".to_string()),
        },
        ClipUpload {
            name: "Hate Me".to_string(),
            description: Some("A song by Ellie Goulding".to_string()),
            url: "https://samplesongs.netlify.app/Hate%20Me.mp3".to_string(),
            duration: Some(190),
            tags: Some("pop,song,ellie goulding".to_string()),
        },
        ClipUpload {
            name: "Solo".to_string(),
            description: Some("A song by Clean Bandit".to_string()),
            url: "https://samplesongs.netlify.app/Solo.mp3".to_string(),
            duration: Some(222),
            tags: Some("pop,electronic,clean bandit".to_string()),
        },
    ];

    let count = sample_clips.len();
    for upload in sample_clips {
        let clip = create_clip(connection, upload).await?;
        debug!("Added sample clip {}", clip);
    }

    info!("Successfully added {} sample clips to the database", count);
    Ok(())
}

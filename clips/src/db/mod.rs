// SPDX-License-Identifier: GPL-2.0-or-later
//
// Provides structures and functions for interacting with the database.

use sqlx::SqlitePool;
use tracing::info;

mod clip;
pub mod seed;

pub use clip::{
    clips_list, create_clip, get_clip, mark_played, remove_clip, search_clips, update_clip, Clip,
};

pub static MIGRATIONS: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/");

/// Prepare the database for use: create the schema if it does not exist, then seed the sample
/// catalog if the database contains no clips at all.
///
/// Failures here are expected to be logged and swallowed by the caller; the service starts
/// regardless of whether the database could be initialized.
pub async fn initialize(pool: &SqlitePool) -> Result<(), crate::Error> {
    info!("Ensuring database tables exist");
    MIGRATIONS.run(pool).await?;

    let mut conn = pool.acquire().await?;
    if seed::is_empty(&mut conn).await? {
        info!("Database is empty; seeding it with the sample catalog");
        seed::seed(&mut conn).await?;
    } else {
        info!("Database already contains clips; skipping the seed");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open an in-memory database");
    MIGRATIONS
        .run(&pool)
        .await
        .expect("Failed to run the migrations");
    pool
}

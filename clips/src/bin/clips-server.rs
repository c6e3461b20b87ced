// SPDX-License-Identifier: GPL-2.0-or-later
use std::str::FromStr;

use clap::Parser;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::{debug, error, info};

use clips::{cli, db, Error};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let opts = cli::Clips::parse();

    if !opts.config.data_directory.exists() {
        std::fs::DirBuilder::new()
            .recursive(true)
            .create(&opts.config.data_directory)
            .expect("Failed to create the data directory");
    }

    debug!("Starting database connection");
    let options = match SqliteConnectOptions::from_str(&opts.config.database_url()) {
        Ok(options) => options.create_if_missing(true),
        Err(e) => {
            error!("Invalid database path: {}", e);
            return;
        }
    };
    let db_pool = match SqlitePoolOptions::new().connect_with(options).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Unable to connect to the database: {}", e);
            return;
        }
    };

    match process_command(opts, db_pool).await {
        Ok(_) => {}
        Err(e) => eprintln!("Error: {e}"),
    }
}

async fn process_command(opts: cli::Clips, db_pool: Pool<Sqlite>) -> Result<(), Error> {
    match opts.command {
        cli::Command::Run {} => {
            // Best-effort boot: a failed migration or seed is logged, not fatal.
            if let Err(e) = db::initialize(&db_pool).await {
                error!("Database initialization failed: {}; starting anyway", e);
            }

            let http_handle = axum_server::Handle::new();
            let handle = http_handle.clone();
            tokio::spawn(async move {
                let _shutdown_signal = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received; beginning graceful shutdown.");
                handle.graceful_shutdown(Some(std::time::Duration::from_secs(15)));
            });

            let http_api = opts.config.http_api;
            let router = clips::web::create_router(db_pool);
            info!("Starting HTTP server on {:?}", &http_api.url);
            axum_server::bind(http_api.url)
                .handle(http_handle)
                .serve(router.into_make_service())
                .await
                .map_err(Error::Server)?;

            Ok(())
        }
        cli::Command::Seed { force } => {
            db::MIGRATIONS.run(&db_pool).await?;
            let mut conn = db_pool.acquire().await?;
            if force || db::seed::is_empty(&mut conn).await? {
                db::seed::seed(&mut conn).await?;
            } else {
                println!("The database already contains clips; use --force to seed it anyway");
            }
            Ok(())
        }
    }
}

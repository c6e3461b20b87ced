// SPDX-License-Identifier: GPL-2.0-or-later
use thiserror::Error as ThisError;

/// An enumeration of errors clips library functions can encounter.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("A database error occurred: {0}")]
    Database(#[from] sqlx::Error),
    #[error("A database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Configuration file could not be read: {0}")]
    ConfigReadError(#[from] std::io::Error),
    #[error("Configuration file could not be parsed: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("Clip not found")]
    NotFound,
    #[error("Streaming is not supported for '{0}' URLs")]
    UnsupportedScheme(String),
    #[error("HTTP server encountered an error: {0}")]
    Server(std::io::Error),
    #[error("Client request is invalid")]
    BadRequest,
}

pub mod cli;
pub mod config;
pub mod db;
pub mod web;

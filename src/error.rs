// src/error.rs

//! Crate-wide error type
//!
//! Every failure in the sync run is fatal; errors carry a diagnostic
//! message sufficient to locate the offending data and propagate up to
//! `main` where they abort the run.

use thiserror::Error;

/// Errors that can abort a sync run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Download error: {0}")]
    DownloadError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Repository metadata error: {0}")]
    MetadataError(String),

    #[error("Source package error: {0}")]
    SourceError(String),

    #[error("Recipe error: {0}")]
    RecipeError(String),
}

/// Convenience result type using our Error
pub type Result<T> = std::result::Result<T, Error>;

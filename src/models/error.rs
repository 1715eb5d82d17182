use std::io;
use thiserror::Error;

/// Failures of the catalog resolver.
///
/// Only the two not-found variants are expected in normal operation; the
/// others mean the disk itself misbehaved mid-listing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Comic not found")]
    ComicNotFound,
    #[error("Chapter not found")]
    ChapterNotFound,
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::ComicNotFound | CatalogError::ChapterNotFound)
    }
}

/// A viewer data source could not deliver what was asked of it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Cannot build request URL from base {0}")]
    InvalidBase(String),
    #[error("Chapter {0} is not in the snapshot")]
    MissingChapter(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

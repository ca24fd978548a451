//! Error types for content providers.

use std::path::PathBuf;

use thiserror::Error;

/// Anything that keeps a run from getting the schedule content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fixture file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with something other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not the expected menus envelope.
    #[error("failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope decoded but carried no schedule HTML.
    #[error("no rawHtml found in API response")]
    NoContent,
}

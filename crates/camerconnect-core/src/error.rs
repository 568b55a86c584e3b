// crates/camerconnect-core/src/error.rs

//! Error taxonomy for directory loading.
//!
//! Only the *load* side can fail: transport problems and unreadable bodies.
//! An empty result is not an error (see [`crate::engine::ListingOutcome`]) and
//! broken fields inside a record are absorbed by the normalizer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Snapshot file or remote resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body was valid UTF-8 but not the JSON shape we expected.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend answered with something that is not JSON at all.
    #[error("response is not JSON: {0}")]
    NonJson(String),

    /// Backend answered with an error status and (maybe) a message.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[cfg(feature = "client")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Operation requires a logged-in session.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DirectoryError {
    /// True for the failures a page shows as "could not load" with a retry link.
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Self::Unauthenticated | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

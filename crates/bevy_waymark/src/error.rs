//! Error types for the bevy_waymark plugin
//!
//! Covers tracking-session startup, content loading and narration wiring.
//! Per-anchor failures are recoverable and isolated; session-level failures
//! abort startup visibly.

use thiserror::Error;

/// The main error type for bevy_waymark operations
#[derive(Error, Debug)]
pub enum BevyWaymarkError {
    /// The tracking session could not be started. Fatal: without visibility
    /// signals no anchor will ever attach.
    #[error("Failed to start tracking session: {0}")]
    SessionStart(String),

    /// A model asset failed to fetch or parse. The affected anchor stays
    /// content-less; other anchors are unaffected.
    #[error("Failed to load content '{path}': {reason}")]
    ContentLoad { path: String, reason: String },

    /// A loaded model carried no animation clips; animation degrades to a
    /// no-op for that anchor.
    #[error("Model '{0}' has no animation clips")]
    MissingAnimation(String),

    /// An anchor manifest could not be parsed.
    #[error("Invalid anchor manifest: {0}")]
    InvalidManifest(String),

    /// A visibility signal referenced a target no anchor was spawned for.
    #[error("No anchor registered for target index {0}")]
    UnknownTarget(usize),

    /// Generic or miscellaneous error
    #[error("{0}")]
    Other(String),
}

impl BevyWaymarkError {
    /// Creates a session start error
    pub fn session_start(reason: impl Into<String>) -> Self {
        BevyWaymarkError::SessionStart(reason.into())
    }

    /// Creates a content load error with path and reason
    pub fn content_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        BevyWaymarkError::ContentLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid manifest error
    pub fn invalid_manifest(reason: impl Into<String>) -> Self {
        BevyWaymarkError::InvalidManifest(reason.into())
    }
}

impl From<waymark::WaymarkError> for BevyWaymarkError {
    fn from(err: waymark::WaymarkError) -> Self {
        match err {
            waymark::WaymarkError::SessionStart(reason) => BevyWaymarkError::SessionStart(reason),
            waymark::WaymarkError::UnknownTarget(index) => BevyWaymarkError::UnknownTarget(index),
            other => BevyWaymarkError::Other(other.to_string()),
        }
    }
}

impl From<String> for BevyWaymarkError {
    fn from(s: String) -> Self {
        BevyWaymarkError::Other(s)
    }
}

impl From<&str> for BevyWaymarkError {
    fn from(s: &str) -> Self {
        BevyWaymarkError::Other(s.to_string())
    }
}

/// Type alias for Result using BevyWaymarkError
pub type Result<T> = std::result::Result<T, BevyWaymarkError>;

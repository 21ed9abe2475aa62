//! Interaction core for marker-anchored AR content
//!
//! The engine-agnostic heart of an image-tracking AR experience: a small set
//! of state machines that reconcile marker-found/lost signals, pointer click
//! timing and animation/audio playback state into consistent, leak-free
//! behavior across repeated marker appearance/disappearance cycles.
//!
//! Rendering, marker tracking, audio decoding and asset loading are supplied
//! by an external engine; this crate only decides *what* should happen and
//! when. The companion `bevy_waymark` crate binds these decisions to Bevy.
//!
//! # Components
//! - [`gesture`]: raw click stream → SingleClick/DoubleClick disambiguation
//! - [`narration`]: gesture → track selection with an at-most-one-active gate
//! - [`timeline`]: per-anchor animation cursor driven by frame deltas
//! - [`anchor`]: the per-marker lifecycle state machine tying it all together
//! - [`tracking`]: the backend contract delivering marker visibility signals
//!
//! # Crate feature flags
//! - `serde` (opt-in): `Serialize`/`Deserialize` impls on the public state
//!   types, for configuration files and snapshots
//!
//! # Quick start
//! ```
//! use std::time::Duration;
//! use waymark::{AnchorInteraction, NarrationTrack};
//!
//! let mut anchor = AnchorInteraction::default();
//!
//! // Marker comes into view, user clicks once.
//! assert!(anchor.target_found());
//! assert_eq!(anchor.observe_click(Duration::from_millis(100)), None);
//!
//! // No second click before the window elapses: a single click resolves.
//! let outcome = anchor.poll_clicks(Duration::from_millis(500)).unwrap();
//! assert_eq!(outcome.started, Some(NarrationTrack::Primary));
//! assert!(anchor.narration().is_playing());
//!
//! // Marker disappears: playback stops, the gate clears.
//! assert!(anchor.target_lost());
//! assert!(!anchor.narration().is_playing());
//! ```

#![warn(missing_docs)]

pub mod anchor;
pub mod gesture;
pub mod narration;
pub mod timeline;
pub mod tracking;

/// Error types for interaction-core operations
#[derive(thiserror::Error, Debug)]
pub enum WaymarkError {
    /// The tracking backend failed to start. Fatal to the session: no
    /// anchor can ever attach without visibility signals.
    #[error("Tracking session failed to start: {0}")]
    SessionStart(String),

    /// A visibility signal referenced a target index no anchor was
    /// registered for.
    #[error("Unknown target index: {0}")]
    UnknownTarget(usize),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for WaymarkError {
    /// Converts a String into [`WaymarkError::Other`]. Prefer the specific
    /// variants where the failure class is known.
    fn from(msg: String) -> Self {
        WaymarkError::Other(msg)
    }
}

impl From<&str> for WaymarkError {
    /// Converts a string slice into [`WaymarkError::Other`].
    fn from(msg: &str) -> Self {
        WaymarkError::Other(msg.to_string())
    }
}

/// Result type for interaction-core operations
pub type Result<T> = std::result::Result<T, WaymarkError>;

// Public API exports
pub use anchor::{AnchorInteraction, AnchorLifecycle, AnchorPhase, GestureOutcome};
pub use gesture::{ClickDisambiguator, Gesture, DEFAULT_CLICK_WINDOW};
pub use narration::{NarrationMode, NarrationState, NarrationTrack};
pub use timeline::Timeline;
pub use tracking::{
    BoxedTrackingBackend, ChannelTracking, TrackingBackend, TrackingFeed, TrackingSignal,
};

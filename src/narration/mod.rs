//! Narration track selection and the at-most-one-active gate
//!
//! One anchor carries two narration tracks (typically the same story in two
//! languages). A single click selects the primary track, a double click the
//! alternate. While either track is active every further gesture is ignored;
//! only losing the marker clears the gate.

use crate::gesture::Gesture;

/// One of the two mutually exclusive narration tracks bound to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrationTrack {
    /// Selected by a single click.
    Primary,
    /// Selected by a double click.
    Alternate,
}

impl NarrationTrack {
    /// The track a disambiguated gesture selects.
    pub fn for_gesture(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Single => NarrationTrack::Primary,
            Gesture::Double => NarrationTrack::Alternate,
        }
    }
}

/// How an anchor reacts to marker visibility and gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrationMode {
    /// Narration and animation start on a disambiguated gesture.
    #[default]
    GestureGated,
    /// The model animates for as long as the marker is visible; gestures are
    /// ignored and no narration plays.
    Ambient,
}

/// Per-anchor playback gate: at most one track active at a time.
///
/// The state is deliberately tiny; the active track is the whole story. A
/// gesture arriving while a track is active is a no-op, and nothing short of
/// [`stop_all`](Self::stop_all) (driven by marker loss) releases the gate.
#[derive(Debug, Clone, Default)]
pub struct NarrationState {
    active: Option<NarrationTrack>,
}

impl NarrationState {
    /// Create an idle narration state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a disambiguated gesture.
    ///
    /// Returns the track that should start playing, or `None` when the
    /// is-playing gate holds and the gesture is ignored.
    pub fn on_gesture(&mut self, gesture: Gesture) -> Option<NarrationTrack> {
        if self.active.is_some() {
            return None;
        }
        let track = NarrationTrack::for_gesture(gesture);
        self.active = Some(track);
        Some(track)
    }

    /// Stop whatever is active and clear the gate.
    ///
    /// Idempotent; returns `true` when a track was actually active. This is
    /// the sole path that releases the gate.
    pub fn stop_all(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// The currently active track, if any.
    pub fn active(&self) -> Option<NarrationTrack> {
        self.active
    }

    /// Whether any track is currently active.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }
}

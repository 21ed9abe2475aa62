//! Animation timeline cursor
//!
//! A per-anchor playback cursor for the model's animation. The frame clock
//! advances it by the rendered frame's delta; gestures restart it from zero
//! so narration and animation always begin in sync. Time is monotonically
//! non-decreasing between restarts.

/// Per-anchor animation playback cursor.
///
/// The timeline does not know about clips or bones; it is the authoritative
/// local time the engine adapter mirrors into its animation subsystem. A
/// stopped timeline ignores advances, so driving every timeline every frame
/// is safe regardless of anchor visibility or gesture state.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    time: f32,
    playing: bool,
}

impl Timeline {
    /// Create a stopped timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cursor by one frame's elapsed seconds.
    ///
    /// Returns the cursor after the advance. A stopped timeline is a no-op;
    /// negative deltas are treated as zero so time never runs backwards.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        if self.playing {
            self.time += delta_secs.max(0.0);
        }
        self.time
    }

    /// Reset the cursor to exactly zero and start playing.
    ///
    /// Restarting is the only operation that moves time backwards.
    pub fn restart(&mut self) {
        self.time = 0.0;
        self.playing = true;
    }

    /// Stop advancing. The cursor keeps its current value.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Current local time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Whether the timeline is currently advancing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

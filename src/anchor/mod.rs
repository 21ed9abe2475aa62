//! Per-marker anchor lifecycle
//!
//! Each physical marker gets one anchor. The lifecycle is a two-state
//! machine (content and click routing exist exactly while the marker is
//! visible), and [`AnchorInteraction`] is the record tying the lifecycle to
//! the anchor's disambiguator, narration gate and animation timeline. All
//! mutation goes through its methods; there is no hidden shared state.

use std::time::Duration;

use crate::gesture::{ClickDisambiguator, Gesture};
use crate::narration::{NarrationMode, NarrationState, NarrationTrack};
use crate::timeline::Timeline;

/// Result of routing raw pointer input through an anchor.
///
/// The gesture is always reported once disambiguation resolves; whether a
/// track actually started depends on the narration gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOutcome {
    /// The disambiguated gesture.
    pub gesture: Gesture,
    /// The track that started, or `None` when the is-playing gate held.
    pub started: Option<NarrationTrack>,
}

/// Visibility-driven lifecycle phase of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorPhase {
    /// Marker not tracked; no content, no click routing.
    #[default]
    Unattached,
    /// Marker tracked; content attached and clicks routed.
    Attached,
}

/// Two-state lifecycle machine with guarded transitions.
///
/// Attach and detach strictly alternate, starting with attach: redundant
/// found/lost signals report `false` and change nothing, which makes
/// teardown idempotent by construction.
#[derive(Debug, Clone, Default)]
pub struct AnchorLifecycle {
    phase: AnchorPhase,
}

impl AnchorLifecycle {
    /// Create a lifecycle in the `Unattached` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker-found signal. Returns `true` on Unattached → Attached.
    pub fn on_target_found(&mut self) -> bool {
        match self.phase {
            AnchorPhase::Unattached => {
                self.phase = AnchorPhase::Attached;
                true
            }
            AnchorPhase::Attached => false,
        }
    }

    /// Marker-lost signal. Returns `true` on Attached → Unattached.
    pub fn on_target_lost(&mut self) -> bool {
        match self.phase {
            AnchorPhase::Attached => {
                self.phase = AnchorPhase::Unattached;
                true
            }
            AnchorPhase::Unattached => false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> AnchorPhase {
        self.phase
    }

    /// Whether the anchor is currently attached.
    pub fn is_attached(&self) -> bool {
        self.phase == AnchorPhase::Attached
    }
}

/// The complete per-anchor interaction record.
///
/// Owns the four pieces of state one marker needs (lifecycle phase, click
/// disambiguator, narration gate, animation timeline) and enforces their
/// interplay:
///
/// - clicks only count while attached,
/// - a started track always restarts the timeline from zero first,
/// - losing the marker stops playback, cancels any pending click window and
///   freezes the timeline, unconditionally and idempotently.
#[derive(Debug, Clone)]
pub struct AnchorInteraction {
    lifecycle: AnchorLifecycle,
    clicks: ClickDisambiguator,
    narration: NarrationState,
    timeline: Timeline,
    mode: NarrationMode,
}

impl AnchorInteraction {
    /// Create a gesture-gated interaction with the given click window.
    pub fn new(click_window: Duration) -> Self {
        Self {
            lifecycle: AnchorLifecycle::new(),
            clicks: ClickDisambiguator::new(click_window),
            narration: NarrationState::new(),
            timeline: Timeline::new(),
            mode: NarrationMode::GestureGated,
        }
    }

    /// Select the narration mode (builder style).
    pub fn with_mode(mut self, mode: NarrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Marker-found signal.
    ///
    /// Returns `true` when the anchor transitions to Attached and content
    /// should be spawned. In [`NarrationMode::Ambient`] the timeline starts
    /// immediately; gesture-gated anchors wait for a click.
    pub fn target_found(&mut self) -> bool {
        if !self.lifecycle.on_target_found() {
            return false;
        }
        if self.mode == NarrationMode::Ambient {
            self.timeline.restart();
        }
        true
    }

    /// Marker-lost signal.
    ///
    /// Unconditionally stops narration and animation and cancels any pending
    /// click window, then detaches. Returns `true` when the anchor was
    /// attached and content should be torn down; calling it again is a
    /// no-op.
    pub fn target_lost(&mut self) -> bool {
        if !self.lifecycle.on_target_lost() {
            return false;
        }
        self.narration.stop_all();
        self.timeline.stop();
        self.clicks.cancel();
        true
    }

    /// Route one raw click at time `now` to this anchor.
    ///
    /// Returns an outcome when the click completes a double-click (or
    /// resolves an expired, unpolled window). Ignored while unattached or in
    /// ambient mode.
    pub fn observe_click(&mut self, now: Duration) -> Option<GestureOutcome> {
        if !self.accepts_clicks() {
            return None;
        }
        let gesture = self.clicks.observe_click(now)?;
        Some(self.resolve_gesture(gesture))
    }

    /// Route a raw double-click event to this anchor.
    pub fn observe_double_click(&mut self) -> Option<GestureOutcome> {
        if !self.accepts_clicks() {
            return None;
        }
        let gesture = self.clicks.observe_double_click();
        Some(self.resolve_gesture(gesture))
    }

    /// Resolve a pending click window against the current time.
    ///
    /// Must run once per turn. A window left over from before a teardown is
    /// cancelled here rather than resolved. This is the stale-timer guard:
    /// the anchor's phase is checked before any gesture is emitted.
    pub fn poll_clicks(&mut self, now: Duration) -> Option<GestureOutcome> {
        if !self.accepts_clicks() {
            self.clicks.cancel();
            return None;
        }
        let gesture = self.clicks.poll(now)?;
        Some(self.resolve_gesture(gesture))
    }

    /// Advance the animation timeline by one frame's elapsed seconds.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        self.timeline.advance(delta_secs)
    }

    fn accepts_clicks(&self) -> bool {
        self.lifecycle.is_attached() && self.mode == NarrationMode::GestureGated
    }

    fn resolve_gesture(&mut self, gesture: Gesture) -> GestureOutcome {
        let started = self.narration.on_gesture(gesture);
        if started.is_some() {
            // Zero the timeline before replaying so audio and animation line up.
            self.timeline.restart();
        }
        GestureOutcome { gesture, started }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> AnchorPhase {
        self.lifecycle.phase()
    }

    /// Whether the anchor is currently attached.
    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_attached()
    }

    /// Whether a click window is pending disambiguation.
    pub fn is_click_pending(&self) -> bool {
        self.clicks.is_pending()
    }

    /// The narration gate.
    pub fn narration(&self) -> &NarrationState {
        &self.narration
    }

    /// The animation timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The configured narration mode.
    pub fn mode(&self) -> NarrationMode {
        self.mode
    }
}

impl Default for AnchorInteraction {
    fn default() -> Self {
        Self::new(crate::gesture::DEFAULT_CLICK_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn attach_detach_strictly_alternate() {
        let mut lifecycle = AnchorLifecycle::new();

        assert!(lifecycle.on_target_found());
        assert!(!lifecycle.on_target_found(), "redundant found is guarded");
        assert!(lifecycle.on_target_lost());
        assert!(!lifecycle.on_target_lost(), "detach is idempotent");
        assert!(lifecycle.on_target_found());
    }

    #[test]
    fn clicks_before_attach_are_ignored() {
        let mut anchor = AnchorInteraction::default();
        assert_eq!(anchor.observe_click(ms(0)), None);
        assert_eq!(anchor.poll_clicks(ms(1_000)), None);
        assert!(!anchor.narration().is_playing());
    }

    #[test]
    fn single_click_starts_primary_and_resets_timeline() {
        let mut anchor = AnchorInteraction::default();
        anchor.target_found();

        assert_eq!(anchor.observe_click(ms(100)), None);
        let outcome = anchor.poll_clicks(ms(500)).expect("window resolved");
        assert_eq!(outcome.gesture, Gesture::Single);
        assert_eq!(outcome.started, Some(NarrationTrack::Primary));
        assert!(anchor.timeline().is_playing());
        assert_relative_eq!(anchor.timeline().time(), 0.0);
    }

    #[test]
    fn gesture_while_playing_leaves_state_untouched() {
        let mut anchor = AnchorInteraction::default();
        anchor.target_found();
        assert_eq!(anchor.observe_click(ms(0)), None);
        let outcome = anchor.poll_clicks(ms(400)).expect("window resolved");
        assert_eq!(outcome.started, Some(NarrationTrack::Primary));

        anchor.advance(2.0);
        let time_before = anchor.timeline().time();

        // Double click while the gate holds: the gesture is still reported,
        // but no track starts and the timeline is untouched.
        assert_eq!(anchor.observe_click(ms(500)), None);
        let gated = anchor.observe_click(ms(550)).expect("double resolved");
        assert_eq!(gated.gesture, Gesture::Double);
        assert_eq!(gated.started, None);
        assert_eq!(anchor.narration().active(), Some(NarrationTrack::Primary));
        assert_relative_eq!(anchor.timeline().time(), time_before);
    }

    #[test]
    fn target_lost_stops_everything() {
        let mut anchor = AnchorInteraction::default();
        anchor.target_found();
        assert_eq!(anchor.observe_click(ms(0)), None);
        let outcome = anchor.observe_click(ms(100)).expect("double resolved");
        assert_eq!(outcome.started, Some(NarrationTrack::Alternate));
        assert!(anchor.narration().is_playing());
        anchor.advance(1.0);

        assert!(anchor.target_lost());
        assert_eq!(anchor.narration().active(), None);
        assert!(!anchor.timeline().is_playing());
        assert!(!anchor.is_click_pending());

        // Second loss is a guarded no-op.
        assert!(!anchor.target_lost());
    }

    #[test]
    fn stale_window_does_not_fire_after_teardown() {
        let mut anchor = AnchorInteraction::default();
        anchor.target_found();
        assert_eq!(anchor.observe_click(ms(0)), None);
        assert!(anchor.is_click_pending());

        // Marker lost while the window is pending; the deadline passing
        // afterwards must not start narration.
        anchor.target_lost();
        assert_eq!(anchor.poll_clicks(ms(1_000)), None);
        assert!(!anchor.narration().is_playing());
    }

    #[test]
    fn window_pending_across_reattach_is_cancelled() {
        let mut anchor = AnchorInteraction::default();
        anchor.target_found();
        assert_eq!(anchor.observe_click(ms(0)), None);
        anchor.target_lost();
        anchor.target_found();

        // The pre-teardown click must not leak into the new session.
        assert_eq!(anchor.poll_clicks(ms(1_000)), None);
    }

    #[test]
    fn repeated_cycles_replay_from_zero() {
        let mut anchor = AnchorInteraction::default();

        for cycle in 0..3u64 {
            let base = cycle * 10_000;
            assert!(anchor.target_found());
            assert_eq!(anchor.observe_click(ms(base)), None);
            let started = anchor
                .poll_clicks(ms(base + 400))
                .and_then(|outcome| outcome.started);
            assert_eq!(started, Some(NarrationTrack::Primary), "cycle {cycle}");
            anchor.advance(3.5);
            assert!(anchor.target_lost());
        }
    }

    #[test]
    fn ambient_mode_animates_without_gestures() {
        let mut anchor =
            AnchorInteraction::default().with_mode(NarrationMode::Ambient);
        anchor.target_found();

        assert!(anchor.timeline().is_playing());
        assert_eq!(anchor.observe_click(ms(0)), None);
        assert_eq!(anchor.observe_double_click(), None);
        assert!(!anchor.narration().is_playing());

        anchor.advance(0.5);
        assert_relative_eq!(anchor.timeline().time(), 0.5);

        anchor.target_lost();
        assert!(!anchor.timeline().is_playing());
    }

    #[test]
    fn two_anchors_evolve_independently() {
        let mut first = AnchorInteraction::default();
        let mut second = AnchorInteraction::default();

        first.target_found();
        second.target_found();

        assert_eq!(first.observe_click(ms(0)), None);
        let started = first.poll_clicks(ms(400)).and_then(|o| o.started);
        assert_eq!(started, Some(NarrationTrack::Primary));

        // Second anchor's gate is its own; no cross-anchor bleed.
        assert!(!second.narration().is_playing());
        assert_eq!(second.observe_click(ms(500)), None);
        assert!(second.observe_click(ms(600)).is_some());
        assert_eq!(second.narration().active(), Some(NarrationTrack::Alternate));
        assert_eq!(first.narration().active(), Some(NarrationTrack::Primary));

        first.target_lost();
        assert!(second.narration().is_playing(), "losing one anchor leaves the other playing");
    }
}

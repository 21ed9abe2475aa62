//! Click gesture disambiguation
//!
//! Collapses a raw stream of pointer clicks into two mutually exclusive
//! logical gestures. A first click arms a timer; if the window elapses
//! undisturbed the click resolves as [`Gesture::Single`], while a second
//! click (or an explicit raw double-click) inside the window cancels the
//! pending single and resolves as [`Gesture::Double`]. Exactly one gesture
//! comes out of every user interaction: never both, never neither.

use std::time::Duration;

/// Disambiguation window used by [`ClickDisambiguator::default`].
///
/// Matches the delay a click handler traditionally waits before committing
/// to a single click.
pub const DEFAULT_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// A disambiguated logical user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gesture {
    /// One click, confirmed by the disambiguation window elapsing.
    Single,
    /// Two clicks inside the window, or a raw double-click event.
    Double,
}

/// Converts raw pointer clicks into [`Gesture`]s using a timing window.
///
/// Timestamps are plain [`Duration`]s measured from any fixed origin (an
/// engine's elapsed-time clock in practice); the disambiguator never reads a
/// wall clock itself, which keeps every interleaving reproducible in tests.
///
/// Callers feed clicks through [`observe_click`](Self::observe_click) and
/// must call [`poll`](Self::poll) once per turn so an undisturbed window can
/// resolve to a single click.
#[derive(Debug, Clone)]
pub struct ClickDisambiguator {
    window: Duration,
    deadline: Option<Duration>,
}

impl ClickDisambiguator {
    /// Create a disambiguator with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Observe one raw click at time `now`.
    ///
    /// Returns `Some(Gesture::Double)` when the click lands inside a pending
    /// window. Returns `Some(Gesture::Single)` when a previous window had
    /// already elapsed but was not yet polled: the expired click resolves
    /// here so it is never lost, and the new click arms a fresh window.
    /// Otherwise arms the window and returns `None`.
    pub fn observe_click(&mut self, now: Duration) -> Option<Gesture> {
        match self.deadline.take() {
            Some(deadline) if now < deadline => Some(Gesture::Double),
            expired => {
                let resolved = expired.map(|_| Gesture::Single);
                self.deadline = Some(now + self.window);
                resolved
            }
        }
    }

    /// Observe a raw double-click event.
    ///
    /// Cancels any pending window (suppressing its single click) and
    /// resolves immediately. Kept for input sources that synthesize a native
    /// double-click; sources that only deliver raw presses get the same
    /// gesture stream from two `observe_click` calls inside the window.
    pub fn observe_double_click(&mut self) -> Gesture {
        self.deadline = None;
        Gesture::Double
    }

    /// Resolve a pending window whose deadline has passed.
    ///
    /// Returns `Some(Gesture::Single)` exactly once per elapsed window.
    pub fn poll(&mut self, now: Duration) -> Option<Gesture> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(Gesture::Single)
            }
            _ => None,
        }
    }

    /// Drop any pending window without emitting a gesture.
    ///
    /// Part of anchor teardown: a timer pending when the marker is lost must
    /// not fire afterwards.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a disambiguation window is currently pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending window, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// The configured disambiguation window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for ClickDisambiguator {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn lone_click_resolves_single_after_window() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(100)), None);
        assert!(d.is_pending());

        // Window not yet elapsed.
        assert_eq!(d.poll(ms(300)), None);
        // Deadline reached: exactly one Single.
        assert_eq!(d.poll(ms(400)), Some(Gesture::Single));
        assert_eq!(d.poll(ms(500)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn second_click_inside_window_resolves_double() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(100)), None);
        assert_eq!(d.observe_click(ms(250)), Some(Gesture::Double));

        // The suppressed single must never surface.
        assert_eq!(d.poll(ms(1_000)), None);
    }

    #[test]
    fn raw_double_click_suppresses_pending_single() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(100)), None);
        assert_eq!(d.observe_double_click(), Gesture::Double);
        assert_eq!(d.poll(ms(1_000)), None);
    }

    #[test]
    fn raw_double_click_without_pending_window_is_immediate() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_double_click(), Gesture::Double);
        assert!(!d.is_pending());
    }

    #[test]
    fn spaced_clicks_each_resolve_single() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(0)), None);
        assert_eq!(d.poll(ms(350)), Some(Gesture::Single));
        assert_eq!(d.observe_click(ms(400)), None);
        assert_eq!(d.poll(ms(750)), Some(Gesture::Single));
    }

    #[test]
    fn expired_unpolled_click_is_not_lost() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(0)), None);

        // The next click arrives after the first window elapsed but before
        // any poll ran: the first interaction still resolves as a Single and
        // the second arms a fresh window.
        assert_eq!(d.observe_click(ms(600)), Some(Gesture::Single));
        assert!(d.is_pending());
        assert_eq!(d.poll(ms(1_000)), Some(Gesture::Single));
    }

    #[test]
    fn cancel_drops_pending_window_silently() {
        let mut d = ClickDisambiguator::default();
        assert_eq!(d.observe_click(ms(100)), None);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll(ms(1_000)), None);
    }

    #[test]
    fn exactly_one_gesture_per_interaction() {
        // Sweep second-click offsets across the boundary; each interleaving
        // must produce exactly one gesture in total.
        for offset in [50u64, 150, 299, 300, 301, 450] {
            let mut d = ClickDisambiguator::default();
            let mut emitted = Vec::new();

            emitted.extend(d.observe_click(ms(0)));
            emitted.extend(d.observe_click(ms(offset)));
            // Drain any window the second click armed.
            emitted.extend(d.poll(ms(offset + 400)));

            let expected = if offset < 300 {
                vec![Gesture::Double]
            } else {
                vec![Gesture::Single, Gesture::Single]
            };
            assert_eq!(emitted, expected, "offset {offset}ms");
        }
    }
}

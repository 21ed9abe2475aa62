//! Tracking backend contract
//!
//! Marker visibility comes from an external tracking engine, typically a
//! computer vision pipeline watching a camera feed. This module defines the narrow
//! contract the interaction core needs from it: a session that can start and
//! stop, and a drainable stream of found/lost signals per target index,
//! raised zero or more times in any order across targets.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Result, WaymarkError};

/// One marker visibility transition reported by the tracking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackingSignal {
    /// The target with this index became visible.
    Found(usize),
    /// The target with this index was lost.
    Lost(usize),
}

/// A pluggable source of marker visibility signals.
///
/// Implementations wrap whatever actually tracks markers; the interaction
/// layer only ever starts the session, stops it, and drains signals once per
/// turn. Start failures are fatal to the session and must be reported, not
/// swallowed.
pub trait TrackingBackend: Send + Sync {
    /// Start delivering signals. Called once per session.
    fn start(&mut self) -> Result<()>;

    /// Stop the session. Signals arriving afterwards are discarded.
    fn stop(&mut self);

    /// Move all pending signals into `out`, preserving arrival order.
    fn drain(&mut self, out: &mut Vec<TrackingSignal>);

    /// Whether the session is currently running.
    fn is_running(&self) -> bool;
}

/// Boxed backend, as stored by engine-side session resources.
pub type BoxedTrackingBackend = Box<dyn TrackingBackend>;

/// Built-in backend fed through a cloneable [`TrackingFeed`] handle.
///
/// The feed side may live on another thread (a vision pipeline posting
/// results) or in a test body; the drain side stays on the main loop.
pub struct ChannelTracking {
    queue: Arc<Mutex<VecDeque<TrackingSignal>>>,
    running: bool,
}

impl ChannelTracking {
    /// Create a backend and the feed handle that pushes signals into it.
    pub fn new() -> (Self, TrackingFeed) {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        let backend = Self {
            queue: Arc::clone(&queue),
            running: false,
        };
        (backend, TrackingFeed { queue })
    }
}

impl TrackingBackend for ChannelTracking {
    fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(WaymarkError::SessionStart(
                "session already running".to_string(),
            ));
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
        self.queue.lock().clear();
    }

    fn drain(&mut self, out: &mut Vec<TrackingSignal>) {
        if !self.running {
            return;
        }
        let mut queue = self.queue.lock();
        out.extend(queue.drain(..));
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Producer handle for a [`ChannelTracking`] backend.
#[derive(Clone)]
pub struct TrackingFeed {
    queue: Arc<Mutex<VecDeque<TrackingSignal>>>,
}

impl TrackingFeed {
    /// Report that a target became visible.
    pub fn found(&self, target: usize) {
        self.push(TrackingSignal::Found(target));
    }

    /// Report that a target was lost.
    pub fn lost(&self, target: usize) {
        self.push(TrackingSignal::Lost(target));
    }

    /// Push an arbitrary signal.
    pub fn push(&self, signal: TrackingSignal) {
        self.queue.lock().push_back(signal);
    }
}

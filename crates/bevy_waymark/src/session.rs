//! Tracking session resource
//!
//! Owns the pluggable [`TrackingBackend`] and pumps its visibility signals
//! into [`TargetFound`]/[`TargetLost`] messages once per frame. The backend
//! is whatever actually watches the camera; the built-in
//! [`ChannelTracking`](waymark::ChannelTracking) is fed from a vision
//! pipeline thread, a script, or a test body.

use bevy::prelude::*;

use waymark::{BoxedTrackingBackend, TrackingBackend, TrackingSignal};

use crate::error::{BevyWaymarkError, Result};
use crate::events::{TargetFound, TargetLost};
use crate::plugin::WaymarkPluginConfig;

/// Resource owning the tracking backend for this session.
#[derive(Resource)]
pub struct TrackingSession {
    backend: BoxedTrackingBackend,
}

impl TrackingSession {
    /// Wrap a backend. The session starts stopped; call
    /// [`start`](Self::start) (or let the plugin auto-start it).
    pub fn new(backend: impl TrackingBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Start the session.
    ///
    /// A failure here is fatal to the whole experience (no anchor can ever
    /// attach), so it is returned to the caller rather than swallowed.
    pub fn start(&mut self) -> Result<()> {
        self.backend
            .start()
            .map_err(|err| BevyWaymarkError::session_start(err.to_string()))
    }

    /// Stop the session. Pending signals are discarded.
    pub fn stop(&mut self) {
        self.backend.stop();
    }

    /// Whether the session is currently running.
    pub fn is_running(&self) -> bool {
        self.backend.is_running()
    }

    pub(crate) fn drain_into(&mut self, out: &mut Vec<TrackingSignal>) {
        self.backend.drain(out);
    }
}

/// Start the session once at startup when the config asks for it.
///
/// Runs every frame but only ever attempts the start once; applications that
/// need startup control call [`TrackingSession::start`] themselves with
/// `auto_start_session` disabled.
pub(crate) fn auto_start_session(
    config: Res<WaymarkPluginConfig>,
    session: Option<ResMut<TrackingSession>>,
    mut attempted: Local<bool>,
) {
    if !config.auto_start_session || *attempted {
        return;
    }
    let Some(mut session) = session else {
        return;
    };
    *attempted = true;

    if let Err(err) = session.start() {
        error!("{err}");
    }
}

/// Drain backend signals into visibility messages.
pub(crate) fn pump_tracking(
    session: Option<ResMut<TrackingSession>>,
    mut found: MessageWriter<TargetFound>,
    mut lost: MessageWriter<TargetLost>,
    mut scratch: Local<Vec<TrackingSignal>>,
) {
    let Some(mut session) = session else {
        return;
    };

    scratch.clear();
    session.drain_into(&mut scratch);

    for signal in scratch.drain(..) {
        match signal {
            TrackingSignal::Found(target) => {
                found.write(TargetFound { target });
            }
            TrackingSignal::Lost(target) => {
                lost.write(TargetLost { target });
            }
        }
    }
}

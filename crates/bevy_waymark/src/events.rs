use bevy::prelude::*;
use waymark::{Gesture, NarrationTrack};

/// A tracked image target became visible. Written by the tracking pump (or
/// directly, e.g. from tests and scripted backends).
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct TargetFound {
    pub target: usize,
}

/// A tracked image target was lost.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct TargetLost {
    pub target: usize,
}

/// One raw pointer click. `target: None` routes the click to every attached
/// anchor (document-wide click semantics); `Some(index)` restricts it to one
/// target's anchor.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct RawClick {
    pub target: Option<usize>,
}

/// A raw double-click from an input source that synthesizes one natively.
/// Sources that only deliver presses never need this; two [`RawClick`]s
/// inside the window produce the same gesture.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct RawDoubleClick {
    pub target: Option<usize>,
}

/// Fired when an anchor attaches its content in response to a found signal.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct AnchorAttached {
    pub entity: Entity,
    pub target: usize,
}

/// Fired when an anchor tears down in response to a lost signal.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct AnchorDetached {
    pub entity: Entity,
    pub target: usize,
}

/// Fired for every disambiguated gesture on an attached anchor, whether or
/// not it started narration.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct GestureDetected {
    pub entity: Entity,
    pub target: usize,
    pub gesture: Gesture,
}

/// Fired when a narration track starts playing on an anchor.
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct NarrationStarted {
    pub entity: Entity,
    pub target: usize,
    pub track: NarrationTrack,
}

/// Fired when an anchor's narration stops (marker lost while playing).
#[derive(Event, Message, Clone, Copy, Debug)]
pub struct NarrationStopped {
    pub entity: Entity,
    pub target: usize,
}

/// Internal hand-off from gesture disambiguation to the narration systems.
#[derive(Event, Message, Clone, Copy, Debug)]
pub(crate) struct NarrationCue {
    pub entity: Entity,
    pub target: usize,
    pub track: NarrationTrack,
}

//! Bevy systems for anchor lifecycle, gestures, narration and the frame clock

pub(super) mod animation;
pub(super) mod gesture;
pub(super) mod lifecycle;
pub(super) mod narration;

pub(super) use animation::*;
pub(super) use gesture::*;
pub(super) use lifecycle::*;
pub(super) use narration::*;

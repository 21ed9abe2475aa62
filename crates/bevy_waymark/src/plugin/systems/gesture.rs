use bevy::prelude::*;

use waymark::GestureOutcome;

use crate::anchor::MarkerAnchor;
use crate::events::{GestureDetected, NarrationCue, RawClick, RawDoubleClick};

/// Translate left mouse presses into document-wide raw clicks.
///
/// One process-wide input source; the routing below dispatches to every
/// attached anchor, so there is no per-anchor listener registration to leak.
pub(in crate::plugin) fn emit_pointer_clicks(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut clicks: MessageWriter<RawClick>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        clicks.write(RawClick { target: None });
    }
}

/// Resolve pending disambiguation windows against the frame clock.
///
/// Runs before click routing so a window that elapsed since last frame
/// resolves as its single click before any new click is observed.
pub(in crate::plugin) fn poll_click_windows(
    time: Res<Time>,
    mut anchors: Query<(Entity, &mut MarkerAnchor)>,
    mut gestures: MessageWriter<GestureDetected>,
    mut cues: MessageWriter<NarrationCue>,
) {
    let now = time.elapsed();
    for (entity, mut anchor) in anchors.iter_mut() {
        let outcome = anchor.interaction.poll_clicks(now);
        emit_outcome(entity, &anchor, outcome, &mut gestures, &mut cues);
    }
}

/// Dispatch raw clicks to the currently attached anchors' disambiguators.
pub(in crate::plugin) fn route_raw_clicks(
    time: Res<Time>,
    mut clicks: MessageReader<RawClick>,
    mut double_clicks: MessageReader<RawDoubleClick>,
    mut anchors: Query<(Entity, &mut MarkerAnchor)>,
    mut gestures: MessageWriter<GestureDetected>,
    mut cues: MessageWriter<NarrationCue>,
) {
    let now = time.elapsed();

    for click in clicks.read() {
        for (entity, mut anchor) in anchors.iter_mut() {
            if click.target.is_some_and(|target| target != anchor.target) {
                continue;
            }
            let outcome = anchor.interaction.observe_click(now);
            emit_outcome(entity, &anchor, outcome, &mut gestures, &mut cues);
        }
    }

    for click in double_clicks.read() {
        for (entity, mut anchor) in anchors.iter_mut() {
            if click.target.is_some_and(|target| target != anchor.target) {
                continue;
            }
            let outcome = anchor.interaction.observe_double_click();
            emit_outcome(entity, &anchor, outcome, &mut gestures, &mut cues);
        }
    }
}

fn emit_outcome(
    entity: Entity,
    anchor: &MarkerAnchor,
    outcome: Option<GestureOutcome>,
    gestures: &mut MessageWriter<GestureDetected>,
    cues: &mut MessageWriter<NarrationCue>,
) {
    let Some(outcome) = outcome else {
        return;
    };

    gestures.write(GestureDetected {
        entity,
        target: anchor.target,
        gesture: outcome.gesture,
    });

    if let Some(track) = outcome.started {
        cues.write(NarrationCue {
            entity,
            target: anchor.target,
            track,
        });
    }
}

use bevy::prelude::*;

use crate::anchor::{AnchorContent, MarkerAnchor};
use crate::content::{spawn_content_clone, ContentLibrary};
use crate::error::BevyWaymarkError;
use crate::events::{AnchorAttached, AnchorDetached, NarrationStopped, TargetFound, TargetLost};
use crate::plugin::WaymarkPluginConfig;

/// Attach anchors whose targets became visible.
///
/// The core lifecycle guards the transition, so redundant found signals and
/// signals for already-attached anchors fall through without side effects. A
/// missing or failed template attaches the anchor content-less; the state
/// machine and narration keep working.
pub(in crate::plugin) fn apply_target_found(
    mut commands: Commands,
    mut found: MessageReader<TargetFound>,
    mut anchors: Query<(Entity, &mut MarkerAnchor, Option<&AnchorContent>)>,
    library: Res<ContentLibrary>,
    mut graphs: Option<ResMut<Assets<AnimationGraph>>>,
    config: Res<WaymarkPluginConfig>,
    mut attached_events: MessageWriter<AnchorAttached>,
) {
    for event in found.read() {
        let mut matched = false;

        for (entity, mut anchor, content) in anchors.iter_mut() {
            if anchor.target != event.target {
                continue;
            }
            matched = true;

            if !anchor.interaction.target_found() {
                continue;
            }

            if let Some(content) = content {
                if let Some(template) = library.template(&content.model) {
                    let (child, binding) = spawn_content_clone(
                        &mut commands,
                        entity,
                        anchor.target,
                        content,
                        template,
                        graphs.as_deref_mut(),
                    );
                    anchor.content_child = Some(child);
                    anchor.animation = binding;
                } else if library.is_failed(&content.model) {
                    warn!(
                        "Content '{}' failed to load; target {} attaches content-less",
                        content.model, anchor.target
                    );
                } else {
                    warn!(
                        "Content '{}' not ready yet; target {} attaches content-less",
                        content.model, anchor.target
                    );
                }
            }

            if config.lifecycle_events {
                attached_events.write(AnchorAttached {
                    entity,
                    target: anchor.target,
                });
            }
        }

        if !matched {
            warn!("{}", BevyWaymarkError::UnknownTarget(event.target));
        }
    }
}

/// Tear down anchors whose targets were lost.
///
/// Stops narration, releases the content clone and cancels any pending
/// click window (via the core record). Teardown is idempotent: a second
/// lost signal for the same found-event changes nothing.
pub(in crate::plugin) fn apply_target_lost(
    mut commands: Commands,
    mut lost: MessageReader<TargetLost>,
    mut anchors: Query<(Entity, &mut MarkerAnchor)>,
    config: Res<WaymarkPluginConfig>,
    mut detached_events: MessageWriter<AnchorDetached>,
    mut stopped_events: MessageWriter<NarrationStopped>,
) {
    for event in lost.read() {
        for (entity, mut anchor) in anchors.iter_mut() {
            if anchor.target != event.target {
                continue;
            }

            let was_playing = anchor.interaction.narration().is_playing();
            if !anchor.interaction.target_lost() {
                continue;
            }

            if let Some(child) = anchor.narration_child.take() {
                commands.entity(child).despawn();
            }
            if was_playing {
                stopped_events.write(NarrationStopped {
                    entity,
                    target: anchor.target,
                });
            }

            if let Some(child) = anchor.content_child.take() {
                // Hide before release so no stale frame renders while the
                // despawn command is still queued.
                commands.entity(child).insert(Visibility::Hidden);
                commands.entity(child).despawn();
            }
            anchor.animation = None;

            if config.lifecycle_events {
                detached_events.write(AnchorDetached {
                    entity,
                    target: anchor.target,
                });
            }
        }
    }
}

/// Spawn content for attached anchors whose template finished loading after
/// the found signal.
pub(in crate::plugin) fn attach_ready_content(
    mut commands: Commands,
    mut anchors: Query<(Entity, &mut MarkerAnchor, &AnchorContent)>,
    library: Res<ContentLibrary>,
    mut graphs: Option<ResMut<Assets<AnimationGraph>>>,
) {
    for (entity, mut anchor, content) in anchors.iter_mut() {
        if !anchor.interaction.is_attached() || anchor.content_child.is_some() {
            continue;
        }
        let Some(template) = library.template(&content.model) else {
            continue;
        };

        let (child, binding) = spawn_content_clone(
            &mut commands,
            entity,
            anchor.target,
            content,
            template,
            graphs.as_deref_mut(),
        );
        anchor.content_child = Some(child);
        anchor.animation = binding;
    }
}

use bevy::audio::{AudioPlayer, AudioSink, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::anchor::{AnchorNarration, MarkerAnchor, NarrationAudio, WaymarkSettings};
use crate::events::{NarrationCue, NarrationStarted};
use crate::plugin::WaymarkPluginConfig;

/// Start the selected track and replay the model's clip from the top.
///
/// The cue only exists when the core gate admitted the gesture, so this
/// system is pure side effect: spawn the audio child, restart the animation
/// player, announce the start.
pub(in crate::plugin) fn start_narration(
    mut commands: Commands,
    mut cues: MessageReader<NarrationCue>,
    mut anchors: Query<(&mut MarkerAnchor, Option<&AnchorNarration>)>,
    mut players: Query<&mut AnimationPlayer>,
    settings: Res<WaymarkSettings>,
    config: Res<WaymarkPluginConfig>,
    mut started_events: MessageWriter<NarrationStarted>,
) {
    for cue in cues.read() {
        let Ok((mut anchor, narration)) = anchors.get_mut(cue.entity) else {
            warn!("Narration cue for entity {:?} without anchor", cue.entity);
            continue;
        };

        // One audio child at a time; anything left from the previous
        // narration is released before the new track starts.
        if let Some(old) = anchor.narration_child.take() {
            commands.entity(old).despawn();
        }

        if let Some(narration) = narration {
            if let Some(source) = narration.source_for(cue.track) {
                let volume = (narration.volume * settings.master_volume).clamp(0.0, 1.0);
                let playback = if narration.looped {
                    PlaybackSettings::LOOP
                } else {
                    PlaybackSettings::ONCE
                };
                let child = commands
                    .spawn((
                        AudioPlayer(source.clone()),
                        playback
                            .with_volume(Volume::Linear(volume))
                            .with_spatial(config.spatial_audio),
                        NarrationAudio { track: cue.track },
                    ))
                    .id();
                commands.entity(cue.entity).add_child(child);
                anchor.narration_child = Some(child);
            } else {
                warn!(
                    "No audio bound for {:?} on target {}",
                    cue.track, cue.target
                );
            }
        }

        if let Some(binding) = anchor.animation.as_ref() {
            if let Some(player_entity) = binding.player {
                if let Ok(mut player) = players.get_mut(player_entity) {
                    player.stop_all();
                    player.start(binding.node).repeat();
                }
            }
        }

        started_events.write(NarrationStarted {
            entity: cue.entity,
            target: cue.target,
            track: cue.track,
        });
    }
}

/// Push master-volume changes into live narration sinks.
pub(in crate::plugin) fn sync_narration_volume(
    settings: Res<WaymarkSettings>,
    anchors: Query<(&MarkerAnchor, &AnchorNarration)>,
    mut sinks: Query<&mut AudioSink>,
) {
    if !settings.is_changed() {
        return;
    }

    for (anchor, narration) in anchors.iter() {
        let Some(child) = anchor.narration_child else {
            continue;
        };
        if let Ok(mut sink) = sinks.get_mut(child) {
            let volume = (narration.volume * settings.master_volume).clamp(0.0, 1.0);
            sink.set_volume(Volume::Linear(volume));
        }
    }
}

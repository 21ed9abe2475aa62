use bevy::prelude::*;

use waymark::NarrationMode;

use crate::anchor::MarkerAnchor;

/// The frame clock: advance every anchor's timeline by this frame's delta.
///
/// Runs unconditionally (a stopped timeline ignores the advance), so
/// timeline time stays monotonic regardless of visibility or gestures.
pub(in crate::plugin) fn advance_timelines(time: Res<Time>, mut anchors: Query<&mut MarkerAnchor>) {
    let delta = time.delta_secs();
    for mut anchor in anchors.iter_mut() {
        anchor.interaction.advance(delta);
    }
}

/// Bind freshly instantiated scene clones to their animation graphs.
///
/// Scene spawning is asynchronous: the `AnimationPlayer` inside a glTF clone
/// appears a frame or two after attach. Once it does, hand it the graph and,
/// when a gesture (or ambient mode) already asked for playback, start the
/// clip.
pub(in crate::plugin) fn wire_animation_players(
    mut commands: Commands,
    mut anchors: Query<&mut MarkerAnchor>,
    children_query: Query<&Children>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for mut anchor in anchors.iter_mut() {
        let anchor = &mut *anchor;
        let Some(content_root) = anchor.content_child else {
            continue;
        };
        let Some(binding) = anchor.animation.as_mut() else {
            continue;
        };
        if binding.player.is_some() {
            continue;
        }

        let Some(player_entity) = find_animation_player(content_root, &children_query, &players)
        else {
            continue;
        };

        commands
            .entity(player_entity)
            .insert(AnimationGraphHandle(binding.graph.clone()));
        binding.player = Some(player_entity);

        let should_play = anchor.interaction.narration().is_playing()
            || (anchor.interaction.mode() == NarrationMode::Ambient
                && anchor.interaction.is_attached());
        if should_play {
            if let Ok(mut player) = players.get_mut(player_entity) {
                player.start(binding.node).repeat();
            }
        }
    }
}

fn find_animation_player(
    root: Entity,
    children_query: &Query<&Children>,
    players: &Query<&mut AnimationPlayer>,
) -> Option<Entity> {
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if players.contains(entity) {
            return Some(entity);
        }
        if let Ok(children) = children_query.get(entity) {
            stack.extend(children.iter());
        }
    }
    None
}

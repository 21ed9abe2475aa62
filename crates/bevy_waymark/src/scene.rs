//! Scene helpers: lighting and the camera audio listener
//!
//! The tracking overlay needs very little scenery of its own: a soft light
//! rig so models read correctly over the camera feed, and a spatial listener
//! riding the camera so narration pans with the view.

use bevy::prelude::*;

/// Marker for the entity carrying the narration listener. Applications that
/// want the listener somewhere other than the camera tag their own entity.
#[derive(Component, Default)]
pub struct WaymarkListener;

/// Spawn the default two-light rig: a soft sky-tinted ambience plus a
/// directional key light.
pub fn spawn_light_rig(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.73, 0.73, 1.0),
        brightness: 300.0,
        ..Default::default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 5_000.0,
            ..Default::default()
        },
        Transform::from_xyz(0.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Attach a [`SpatialListener`] to the listener entity, falling back to the
/// active camera when nothing is tagged.
pub(crate) fn ensure_spatial_listener(
    mut commands: Commands,
    tagged: Query<Entity, (With<WaymarkListener>, Without<SpatialListener>)>,
    cameras: Query<Entity, (With<Camera>, Without<SpatialListener>)>,
    listeners: Query<(), With<SpatialListener>>,
) {
    if !listeners.is_empty() {
        return;
    }

    let host = tagged.iter().next().or_else(|| cameras.iter().next());
    if let Some(entity) = host {
        commands.entity(entity).insert(SpatialListener::default());
    }
}

//! Scripted gallery walkthrough
//!
//! Runs the full anchor/gesture/narration pipeline without a camera or
//! tracking hardware: a script feeds marker visibility through the channel
//! backend while the mouse provides real clicks. Single-click a "visible"
//! marker for the primary narration, double-click for the alternate.

use bevy::prelude::*;
use bevy_waymark::{
    AnchorAttached, AnchorDetached, ManifestSource, NarrationStarted, TrackingFeed,
    TrackingSession, WaymarkPlugin, WaymarkPluginConfig,
};
use waymark::ChannelTracking;

/// Producer half of the tracking channel, driven by the script below.
#[derive(Resource)]
struct ScriptFeed(TrackingFeed);

/// Alternates marker visibility: each marker stays visible for a stretch,
/// then drops out, like a visitor walking along a wall of exhibits.
#[derive(Resource)]
struct WalkScript {
    timer: Timer,
    step: usize,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(WaymarkPlugin::with_config(
            WaymarkPluginConfig::default().spatial_audio(true),
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, (walk_markers, report_lifecycle))
        .run();
}

fn setup(mut commands: Commands, assets: Res<AssetServer>) {
    commands.spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.8, 2.5)));
    bevy_waymark::spawn_light_rig(&mut commands);

    let (backend, feed) = ChannelTracking::new();
    commands.insert_resource(TrackingSession::new(backend));
    commands.insert_resource(ScriptFeed(feed));
    commands.insert_resource(WalkScript {
        timer: Timer::from_seconds(6.0, TimerMode::Repeating),
        step: 0,
    });

    commands.spawn(ManifestSource::new(assets.load("gallery.anchors.ron")));
}

fn walk_markers(time: Res<Time>, mut script: ResMut<WalkScript>, feed: Res<ScriptFeed>) {
    if !script.timer.tick(time.delta()).just_finished() {
        return;
    }

    // Steps: marker 0 visible, swap to marker 1, both hidden, repeat.
    match script.step % 3 {
        0 => feed.0.found(0),
        1 => {
            feed.0.lost(0);
            feed.0.found(1);
        }
        _ => feed.0.lost(1),
    }
    script.step += 1;
}

fn report_lifecycle(
    mut attached: MessageReader<AnchorAttached>,
    mut detached: MessageReader<AnchorDetached>,
    mut started: MessageReader<NarrationStarted>,
) {
    for event in attached.read() {
        info!("Marker {} in view; click once or twice", event.target);
    }
    for event in detached.read() {
        info!("Marker {} left view", event.target);
    }
    for event in started.read() {
        info!("Narration {:?} started on marker {}", event.track, event.target);
    }
}

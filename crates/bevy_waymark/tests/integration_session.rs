//! Integration tests for the tracking session and diagnostics
//!
//! Exercises the backend seam end to end: a channel-fed backend pumping
//! visibility signals through the plugin, session start/stop semantics, and
//! the fatal-start failure surface.

use bevy::diagnostic::{DiagnosticsPlugin, DiagnosticsStore};
use bevy::prelude::*;
use bevy_waymark::{
    AnchorAttached, BevyWaymarkError, ChannelTracking, MarkerAnchor, TrackingBackend,
    TrackingSession, TrackingSignal, WaymarkPlugin, ANCHORS_ATTACHED_PATH,
};

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::audio::AudioPlugin::default(),
        WaymarkPlugin::default(),
    ));
    app
}

#[test]
fn channel_backend_pumps_visibility_signals() {
    let mut app = create_test_app();
    let (backend, feed) = ChannelTracking::new();
    app.insert_resource(TrackingSession::new(backend));

    let entity = app.world_mut().spawn(MarkerAnchor::new(0)).id();

    // Auto-start kicks in on the first frame; the queued signal drains in
    // the same pump pass.
    feed.found(0);
    app.update();

    let anchor = app.world().entity(entity).get::<MarkerAnchor>().unwrap();
    assert!(anchor.is_attached());
    assert_eq!(
        app.world().resource::<Messages<AnchorAttached>>().len(),
        1
    );

    feed.lost(0);
    app.update();
    let anchor = app.world().entity(entity).get::<MarkerAnchor>().unwrap();
    assert!(!anchor.is_attached());
}

#[test]
fn stopped_session_delivers_no_signals() {
    let mut app = create_test_app();
    let (backend, feed) = ChannelTracking::new();
    app.insert_resource(TrackingSession::new(backend));

    let entity = app.world_mut().spawn(MarkerAnchor::new(0)).id();

    app.update();
    app.world_mut()
        .resource_mut::<TrackingSession>()
        .stop();

    feed.found(0);
    app.update();

    let anchor = app.world().entity(entity).get::<MarkerAnchor>().unwrap();
    assert!(!anchor.is_attached());
}

#[test]
fn session_start_failure_is_surfaced() {
    struct BrokenCamera;

    impl TrackingBackend for BrokenCamera {
        fn start(&mut self) -> waymark::Result<()> {
            Err(waymark::WaymarkError::SessionStart(
                "camera unavailable".to_string(),
            ))
        }
        fn stop(&mut self) {}
        fn drain(&mut self, _out: &mut Vec<TrackingSignal>) {}
        fn is_running(&self) -> bool {
            false
        }
    }

    let mut session = TrackingSession::new(BrokenCamera);
    let err = session.start().expect_err("start must fail");
    assert!(matches!(err, BevyWaymarkError::SessionStart(_)));
    assert!(err.to_string().contains("camera unavailable"));
}

#[test]
fn restarting_a_running_channel_session_fails() {
    let (backend, _feed) = ChannelTracking::new();
    let mut session = TrackingSession::new(backend);

    session.start().expect("first start succeeds");
    assert!(session.is_running());
    assert!(session.start().is_err(), "double start is rejected");
}

#[test]
fn diagnostics_record_attached_anchor_count() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::audio::AudioPlugin::default(),
        DiagnosticsPlugin::default(),
        WaymarkPlugin::default(),
    ));

    app.world_mut().spawn(MarkerAnchor::new(0));
    app.world_mut().spawn(MarkerAnchor::new(1));

    app.world_mut()
        .resource_mut::<Messages<bevy_waymark::TargetFound>>()
        .write(bevy_waymark::TargetFound { target: 0 });
    app.update();

    let store = app.world().resource::<DiagnosticsStore>();
    let attached = store
        .get(&ANCHORS_ATTACHED_PATH)
        .and_then(|diag| diag.value());
    assert_eq!(attached, Some(1.0));
}

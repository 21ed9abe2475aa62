//! Behavioural tests for the anchor/gesture/narration pipeline
//!
//! Drives the plugin headless: visibility and click messages in, component
//! state and lifecycle messages out. Wall-clock is simulated through the
//! virtual clock so every disambiguation interleaving is reproducible.

use std::time::Duration;

use bevy::prelude::*;
use bevy_waymark::{
    AnchorDetached, AnchorNarration, GestureDetected, MarkerAnchor, NarrationStarted,
    NarrationStopped, NarrationTrack, RawClick, TargetFound, TargetLost, WaymarkPlugin,
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

fn spawn_anchor(app: &mut App, target: usize) -> Entity {
    let primary = app.world().resource::<AssetServer>().load("sounds/a.mp3");
    let alternate = app.world().resource::<AssetServer>().load("sounds/b.mp3");
    app.world_mut()
        .spawn((
            MarkerAnchor::new(target),
            AnchorNarration::new(primary, alternate),
        ))
        .id()
}

fn write_found(app: &mut App, target: usize) {
    app.world_mut()
        .resource_mut::<Messages<TargetFound>>()
        .write(TargetFound { target });
}

fn write_lost(app: &mut App, target: usize) {
    app.world_mut()
        .resource_mut::<Messages<TargetLost>>()
        .write(TargetLost { target });
}

fn write_click(app: &mut App, target: Option<usize>) {
    app.world_mut()
        .resource_mut::<Messages<RawClick>>()
        .write(RawClick { target });
}

fn advance(app: &mut App, millis: u64) {
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .advance_by(Duration::from_millis(millis));
}

fn anchor<'a>(app: &'a App, entity: Entity) -> &'a MarkerAnchor {
    app.world()
        .entity(entity)
        .get::<MarkerAnchor>()
        .expect("anchor component present")
}

#[test]
fn anchor_attaches_on_target_found() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    app.update();
    assert!(!anchor(&app, entity).is_attached());

    write_found(&mut app, 0);
    app.update();

    assert!(anchor(&app, entity).is_attached());
}

#[test]
fn detach_is_idempotent_and_emits_once() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();

    // Two lost signals for one found-event: one teardown, one detach message.
    write_lost(&mut app, 0);
    write_lost(&mut app, 0);
    app.update();

    assert!(!anchor(&app, entity).is_attached());
    let detached = app.world().resource::<Messages<AnchorDetached>>();
    assert_eq!(detached.len(), 1, "teardown must not run twice");
}

#[test]
fn single_click_starts_primary_track() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();

    write_click(&mut app, None);
    app.update();
    assert!(
        anchor(&app, entity).is_click_pending(),
        "window armed, nothing playing yet"
    );
    assert!(!anchor(&app, entity).narration().is_playing());

    advance(&mut app, 400);
    app.update();

    let state = anchor(&app, entity);
    assert_eq!(state.narration().active(), Some(NarrationTrack::Primary));
    assert!(state.timeline().is_playing());

    let started = app.world().resource::<Messages<NarrationStarted>>();
    assert_eq!(started.len(), 1);
}

#[test]
fn double_click_starts_alternate_track() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();

    // Two raw clicks in the same frame land inside the window.
    write_click(&mut app, None);
    write_click(&mut app, None);
    app.update();

    let state = anchor(&app, entity);
    assert_eq!(state.narration().active(), Some(NarrationTrack::Alternate));

    // The suppressed single click must not fire later.
    advance(&mut app, 500);
    app.update();
    assert_eq!(
        anchor(&app, entity).narration().active(),
        Some(NarrationTrack::Alternate)
    );
}

#[test]
fn gesture_while_playing_is_ignored() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();
    write_click(&mut app, None);
    write_click(&mut app, None);
    app.update();
    assert_eq!(
        anchor(&app, entity).narration().active(),
        Some(NarrationTrack::Alternate)
    );

    advance(&mut app, 1_000);
    app.update();
    let time_before = anchor(&app, entity).timeline().time();

    // Another double click: gesture observed, state untouched.
    write_click(&mut app, None);
    write_click(&mut app, None);
    app.update();

    let state = anchor(&app, entity);
    assert_eq!(state.narration().active(), Some(NarrationTrack::Alternate));
    assert!(state.timeline().is_playing());
    assert!(
        state.timeline().time() >= time_before,
        "gated gesture must not reset the timeline"
    );

    let gestures = app.world().resource::<Messages<GestureDetected>>();
    assert!(!gestures.is_empty(), "gated gestures are still reported");
}

#[test]
fn target_lost_stops_narration_and_detaches() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();
    write_click(&mut app, None);
    app.update();
    advance(&mut app, 400);
    app.update();
    assert!(anchor(&app, entity).narration().is_playing());

    write_lost(&mut app, 0);
    app.update();

    let state = anchor(&app, entity);
    assert!(!state.is_attached());
    assert_eq!(state.narration().active(), None);
    assert!(!state.timeline().is_playing());
    assert!(state.content_child().is_none());

    let stopped = app.world().resource::<Messages<NarrationStopped>>();
    assert_eq!(stopped.len(), 1);
}

#[test]
fn stale_click_window_is_cancelled_by_teardown() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();

    // Arm the window, then lose the marker before it elapses.
    write_click(&mut app, None);
    app.update();
    assert!(anchor(&app, entity).is_click_pending());

    write_lost(&mut app, 0);
    app.update();
    assert!(!anchor(&app, entity).is_click_pending());

    // The deadline passing afterwards must not start narration.
    advance(&mut app, 1_000);
    app.update();

    assert!(!anchor(&app, entity).narration().is_playing());
    let started = app.world().resource::<Messages<NarrationStarted>>();
    assert!(started.is_empty(), "stale window fired after teardown");
}

#[test]
fn reattach_after_loss_replays_from_scratch() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    for _ in 0..3 {
        write_found(&mut app, 0);
        app.update();

        write_click(&mut app, None);
        app.update();
        advance(&mut app, 400);
        app.update();
        assert_eq!(
            anchor(&app, entity).narration().active(),
            Some(NarrationTrack::Primary)
        );

        write_lost(&mut app, 0);
        app.update();
        assert_eq!(anchor(&app, entity).narration().active(), None);
    }
}

#[test]
fn anchors_evolve_independently() {
    let mut app = create_test_app();
    let first = spawn_anchor(&mut app, 0);
    let second = spawn_anchor(&mut app, 1);

    write_found(&mut app, 0);
    write_found(&mut app, 1);
    app.update();

    // Targeted clicks: single on 0, double on 1.
    write_click(&mut app, Some(0));
    app.update();
    write_click(&mut app, Some(1));
    write_click(&mut app, Some(1));
    app.update();
    advance(&mut app, 400);
    app.update();

    assert_eq!(
        anchor(&app, first).narration().active(),
        Some(NarrationTrack::Primary)
    );
    assert_eq!(
        anchor(&app, second).narration().active(),
        Some(NarrationTrack::Alternate)
    );

    // Losing the first marker leaves the second playing.
    write_lost(&mut app, 0);
    app.update();
    assert_eq!(anchor(&app, first).narration().active(), None);
    assert_eq!(
        anchor(&app, second).narration().active(),
        Some(NarrationTrack::Alternate)
    );
}

#[test]
fn content_less_anchor_still_narrates() {
    let mut app = create_test_app();

    // No AnchorContent at all: the load-failure degradation path.
    let primary = app.world().resource::<AssetServer>().load("sounds/a.mp3");
    let alternate = app.world().resource::<AssetServer>().load("sounds/b.mp3");
    let entity = app
        .world_mut()
        .spawn((MarkerAnchor::new(0), AnchorNarration::new(primary, alternate)))
        .id();

    write_found(&mut app, 0);
    app.update();
    assert!(anchor(&app, entity).is_attached());

    write_click(&mut app, None);
    app.update();
    advance(&mut app, 400);
    app.update();

    assert_eq!(
        anchor(&app, entity).narration().active(),
        Some(NarrationTrack::Primary)
    );
}

#[test]
fn timeline_time_is_monotonic_between_resets() {
    let mut app = create_test_app();
    let entity = spawn_anchor(&mut app, 0);

    write_found(&mut app, 0);
    app.update();
    write_click(&mut app, None);
    write_click(&mut app, None);
    app.update();

    let mut last = anchor(&app, entity).timeline().time();
    for _ in 0..5 {
        advance(&mut app, 16);
        app.update();
        let now = anchor(&app, entity).timeline().time();
        assert!(now >= last, "timeline went backwards: {now} < {last}");
        last = now;
    }
}

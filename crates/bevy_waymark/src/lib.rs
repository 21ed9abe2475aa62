//! Bevy plugin for marker-anchored AR content
//!
//! This crate binds the [`waymark`] interaction core to Bevy: image-tracked
//! markers anchor cloned 3D models, and a single click or double click on a
//! visible marker starts one of two narration tracks together with the
//! model's animation, replayed from the top every time.
//!
//! The plugin handles the full lifecycle through Bevy's ECS:
//! - Visibility signals from a pluggable tracking backend
//! - Clone-on-attach content spawning from cached glTF templates
//! - Click/double-click disambiguation with a per-anchor timing window
//! - Mutually exclusive narration tracks gated to one active at a time
//! - Teardown on marker loss: audio stopped, content despawned, pending
//!   click windows cancelled
//!
//! # Quick start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_waymark::{ManifestSource, TrackingSession, WaymarkPlugin};
//! use waymark::ChannelTracking;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(WaymarkPlugin::default())
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, assets: Res<AssetServer>) {
//!     commands.spawn(Camera3d::default());
//!
//!     // The backend's feed half goes to whatever watches the camera.
//!     let (backend, _feed) = ChannelTracking::new();
//!     commands.insert_resource(TrackingSession::new(backend));
//!
//!     commands.spawn(ManifestSource::new(assets.load("experience.anchors.ron")));
//! }
//! ```
//!
//! # Driving anchors by hand
//!
//! Anchors are ordinary entities; manifests are optional sugar. Spawn a
//! [`MarkerAnchor`] with [`AnchorContent`]/[`AnchorNarration`] companions and
//! write [`TargetFound`]/[`TargetLost`] messages yourself (tests do exactly
//! this):
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_waymark::TargetFound;
//!
//! fn force_visible(mut found: MessageWriter<TargetFound>) {
//!     found.write(TargetFound { target: 0 });
//! }
//! ```
//!
//! # Architecture
//!
//! Systems run in data-flow order each frame:
//!
//! 1. **Tracking pump** (`PreUpdate`): backend signals become
//!    `TargetFound`/`TargetLost` messages; lifecycle systems attach or tear
//!    down anchors.
//! 2. **Content**: glTF templates are polled, ready templates cloned under
//!    attached anchors, animation players wired to their graphs.
//! 3. **Gestures**: pending click windows resolve, raw clicks are routed to
//!    every attached anchor's disambiguator.
//! 4. **Narration**: admitted gestures spawn the audio child and restart
//!    the clip.
//! 5. **Frame clock**: every timeline advances by the frame delta.
//!
//! # Module Organization
//!
//! - [`anchor`] - Anchor components and global settings
//! - [`content`] - glTF template cache and clone-on-attach
//! - [`manifest`] - Declarative RON experience manifests
//! - [`session`] - Tracking session resource and signal pump
//! - [`scene`] - Lighting and listener helpers
//! - [`events`] - Typed messages in and out of the plugin
//! - [`plugin`] - Bevy plugin integration and systems

pub mod anchor;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod manifest;
pub mod plugin;
pub mod scene;
pub mod session;

pub use anchor::{
    AnchorContent, AnchorContentRoot, AnchorNarration, MarkerAnchor, NarrationAudio,
    WaymarkSettings,
};
pub use content::{ContentLibrary, ContentTemplate, TemplateState};
pub use diagnostics::{update_diagnostics, ANCHORS_ATTACHED_PATH, NARRATIONS_ACTIVE_PATH};
pub use error::{BevyWaymarkError, Result};
pub use events::{
    AnchorAttached, AnchorDetached, GestureDetected, NarrationStarted, NarrationStopped, RawClick,
    RawDoubleClick, TargetFound, TargetLost,
};
pub use manifest::{AnchorEntry, AnchorManifest, AnchorManifestLoader, ManifestSource};
pub use plugin::{WaymarkPlugin, WaymarkPluginConfig};
pub use scene::{spawn_light_rig, WaymarkListener};
pub use session::TrackingSession;

// The core types application code needs most often.
pub use waymark::{
    AnchorPhase, ChannelTracking, Gesture, NarrationMode, NarrationTrack, TrackingBackend,
    TrackingFeed, TrackingSignal,
};

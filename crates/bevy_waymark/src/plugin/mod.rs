//! Plugin orchestration for marker-anchored narration within Bevy.
//!
//! Contains the main Bevy plugin definition, configuration, and system
//! wiring that integrates anchor lifecycle, gesture disambiguation,
//! narration and the frame clock into any Bevy application.

mod config;
mod systems;

pub use config::WaymarkPluginConfig;

use self::systems::{
    advance_timelines, apply_target_found, apply_target_lost, attach_ready_content,
    emit_pointer_clicks, poll_click_windows, route_raw_clicks, start_narration,
    sync_narration_volume, wire_animation_players,
};
use crate::anchor::WaymarkSettings;
use crate::content::{poll_content_loads, ContentLibrary};
use crate::diagnostics::{register as register_diagnostics, update_diagnostics};
use crate::events::{
    AnchorAttached, AnchorDetached, GestureDetected, NarrationCue, NarrationStarted,
    NarrationStopped, RawClick, RawDoubleClick, TargetFound, TargetLost,
};
use crate::manifest::{spawn_manifest_anchors, AnchorManifest, AnchorManifestLoader};
use crate::scene::ensure_spatial_listener;
use crate::session::{auto_start_session, pump_tracking};
use bevy::prelude::*;

/// Bevy plugin wiring marker tracking, gestures and narration together.
#[derive(Default)]
pub struct WaymarkPlugin {
    config: WaymarkPluginConfig,
}

impl WaymarkPlugin {
    /// Create a plugin instance with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin instance using the provided configuration.
    pub fn with_config(config: WaymarkPluginConfig) -> Self {
        Self { config }
    }

    /// Apply mutations to the internal configuration prior to registering.
    pub fn configure(mut self, configure: impl FnOnce(&mut WaymarkPluginConfig)) -> Self {
        configure(&mut self.config);
        self
    }

    /// Access the current configuration.
    pub fn config(&self) -> &WaymarkPluginConfig {
        &self.config
    }
}

impl Plugin for WaymarkPlugin {
    fn build(&self, app: &mut App) {
        // Expose configuration and global playback settings.
        app.insert_resource(self.config.clone());
        app.init_resource::<WaymarkSettings>();
        app.init_resource::<ContentLibrary>();

        // Message channels always exist; individual systems check the
        // configuration before emitting.
        app.add_message::<TargetFound>();
        app.add_message::<TargetLost>();
        app.add_message::<RawClick>();
        app.add_message::<RawDoubleClick>();
        app.add_message::<AnchorAttached>();
        app.add_message::<AnchorDetached>();
        app.add_message::<GestureDetected>();
        app.add_message::<NarrationCue>();
        app.add_message::<NarrationStarted>();
        app.add_message::<NarrationStopped>();

        // Optional declarative manifests.
        if self.config.manifests {
            app.init_asset::<AnchorManifest>();
            app.init_asset_loader::<AnchorManifestLoader>();
            app.add_systems(Update, spawn_manifest_anchors);
        }

        // Visibility signals resolve before the frame's interaction systems.
        app.add_systems(
            PreUpdate,
            (
                auto_start_session,
                pump_tracking,
                apply_target_found,
                apply_target_lost,
            )
                .chain(),
        );

        // Content loading and scene wiring.
        app.add_systems(
            Update,
            (poll_content_loads, attach_ready_content, wire_animation_players).chain(),
        );

        // Gesture → narration → frame clock, in data-flow order. Polling
        // runs before routing so an elapsed window resolves ahead of any
        // click observed this frame.
        app.add_systems(
            Update,
            (
                poll_click_windows,
                route_raw_clicks,
                start_narration,
                advance_timelines,
                sync_narration_volume,
            )
                .chain()
                .after(wire_animation_players),
        );

        if self.config.pointer_input {
            app.add_systems(Update, emit_pointer_clicks.before(route_raw_clicks));
        }

        if self.config.spatial_audio {
            app.add_systems(Update, ensure_spatial_listener);
        }

        if self.config.diagnostics {
            register_diagnostics(app);
            app.add_systems(Update, update_diagnostics);
        }
    }
}

//! Anchor components and global playback settings
//!
//! One entity per configured image target carries a [`MarkerAnchor`]: the
//! interaction record from the core crate plus the runtime handles the
//! plugin's systems maintain (content child, narration child, animation
//! binding). Optional companions: [`AnchorContent`] names the model template
//! to clone on attach, [`AnchorNarration`] the two audio tracks.
//!
//! # Spawning an anchor
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_waymark::{AnchorContent, AnchorNarration, MarkerAnchor};
//!
//! fn setup(mut commands: Commands, assets: Res<AssetServer>) {
//!     commands.spawn((
//!         MarkerAnchor::new(0),
//!         AnchorContent::new("models/exhibit.glb"),
//!         AnchorNarration::new(
//!             assets.load("sounds/exhibit_my.mp3"),
//!             assets.load("sounds/exhibit_en.mp3"),
//!         ),
//!     ));
//! }
//! ```

use bevy::prelude::*;
use std::time::Duration;
use waymark::{AnchorInteraction, AnchorPhase, NarrationMode, NarrationState, NarrationTrack, Timeline};

/// Animation wiring for one attached content clone.
#[derive(Clone)]
pub(crate) struct AnimationBinding {
    /// Graph holding the model's first clip.
    pub graph: Handle<AnimationGraph>,
    /// Node of that clip within the graph.
    pub node: AnimationNodeIndex,
    /// The `AnimationPlayer` entity inside the spawned scene, once found.
    pub player: Option<Entity>,
}

/// Component for one tracked image target.
///
/// Owns the core interaction record (lifecycle phase, click disambiguator,
/// narration gate, animation timeline) and the entity handles the plugin's
/// systems attach and tear down around it. The anchor entity itself lives for
/// the whole session; only its children come and go with marker visibility.
#[derive(Component)]
pub struct MarkerAnchor {
    /// Index of the marker inside the tracking bundle.
    pub target: usize,
    /// Core interaction state. Mutated only through its guarded methods.
    pub(crate) interaction: AnchorInteraction,
    /// Spawned content clone, while attached and the template is ready.
    pub(crate) content_child: Option<Entity>,
    /// Spawned audio entity, while a narration track plays.
    pub(crate) narration_child: Option<Entity>,
    /// Animation graph wiring for the current content clone.
    pub(crate) animation: Option<AnimationBinding>,
}

impl MarkerAnchor {
    /// Create an anchor for the given target index, gesture-gated with the
    /// default click window.
    pub fn new(target: usize) -> Self {
        Self {
            target,
            interaction: AnchorInteraction::default(),
            content_child: None,
            narration_child: None,
            animation: None,
        }
    }

    /// Override the click disambiguation window (builder style).
    pub fn with_click_window(mut self, window: Duration) -> Self {
        let mode = self.interaction.mode();
        self.interaction = AnchorInteraction::new(window).with_mode(mode);
        self
    }

    /// Select the narration mode (builder style).
    pub fn with_mode(mut self, mode: NarrationMode) -> Self {
        self.interaction = self.interaction.with_mode(mode);
        self
    }

    /// Whether the marker is currently tracked and content is attached.
    pub fn is_attached(&self) -> bool {
        self.interaction.is_attached()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> AnchorPhase {
        self.interaction.phase()
    }

    /// The narration gate.
    pub fn narration(&self) -> &NarrationState {
        self.interaction.narration()
    }

    /// The animation timeline.
    pub fn timeline(&self) -> &Timeline {
        self.interaction.timeline()
    }

    /// Whether a click window is pending disambiguation.
    pub fn is_click_pending(&self) -> bool {
        self.interaction.is_click_pending()
    }

    /// The configured narration mode.
    pub fn mode(&self) -> NarrationMode {
        self.interaction.mode()
    }

    /// The spawned content clone, while one exists.
    pub fn content_child(&self) -> Option<Entity> {
        self.content_child
    }
}

/// Names the model template an anchor clones on attach.
#[derive(Component, Clone, Debug)]
pub struct AnchorContent {
    /// Asset path of the glTF/GLB model.
    pub model: String,
    /// Scale applied to the spawned clone.
    pub scale: Vec3,
    /// Position offset of the clone relative to the anchor.
    pub offset: Vec3,
}

impl AnchorContent {
    /// Reference a model at its natural size and position.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            scale: Vec3::ONE,
            offset: Vec3::ZERO,
        }
    }

    /// Set the clone's scale (builder style).
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the clone's position offset (builder style).
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// The two narration tracks bound to an anchor.
///
/// A single click starts `primary`, a double click `alternate`, typically
/// the same narration in two languages. Defaults: volume 0.5, non-looping.
#[derive(Component, Clone, Default)]
pub struct AnchorNarration {
    /// Track started by a single click.
    pub primary: Option<Handle<AudioSource>>,
    /// Track started by a double click.
    pub alternate: Option<Handle<AudioSource>>,
    /// Per-anchor volume, multiplied by [`WaymarkSettings::master_volume`].
    pub volume: f32,
    /// Whether tracks loop until the marker is lost.
    pub looped: bool,
}

impl AnchorNarration {
    /// Bind both tracks.
    pub fn new(primary: Handle<AudioSource>, alternate: Handle<AudioSource>) -> Self {
        Self {
            primary: Some(primary),
            alternate: Some(alternate),
            volume: 0.5,
            looped: false,
        }
    }

    /// Set the per-anchor volume (builder style, clamped to 0.0–1.0).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable looping (builder style).
    pub fn looping(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// The audio source a track maps to, if one is bound.
    pub fn source_for(&self, track: NarrationTrack) -> Option<&Handle<AudioSource>> {
        match track {
            NarrationTrack::Primary => self.primary.as_ref(),
            NarrationTrack::Alternate => self.alternate.as_ref(),
        }
    }
}

/// Marker component on a spawned content clone.
#[derive(Component, Clone, Copy, Debug)]
pub struct AnchorContentRoot {
    /// Target index of the owning anchor.
    pub target: usize,
}

/// Marker component on a spawned narration audio entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct NarrationAudio {
    /// Track this entity is playing.
    pub track: NarrationTrack,
}

/// Resource for global playback settings affecting all anchors.
///
/// # Example
///
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_waymark::WaymarkSettings;
///
/// fn quiet_mode(mut settings: ResMut<WaymarkSettings>) {
///     settings.master_volume = 0.2;
/// }
/// ```
#[derive(Resource)]
pub struct WaymarkSettings {
    /// Master volume multiplier applied on top of per-anchor volumes.
    pub master_volume: f32,
}

impl Default for WaymarkSettings {
    fn default() -> Self {
        Self { master_volume: 1.0 }
    }
}

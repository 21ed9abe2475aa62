//! Declarative anchor manifests
//!
//! An experience is usually two or three markers, one model and a handful of
//! sound files: exactly the kind of thing that belongs in a data file
//! rather than code. A manifest is a RON asset naming the marker bundle and
//! one entry per target; spawning a [`ManifestSource`] brings the whole
//! experience up once the asset loads. Hand-spawned anchors keep working
//! alongside.
//!
//! ```ron
//! (
//!     marker_bundle: Some("targets/banner.mind"),
//!     anchors: [
//!         (
//!             target: 0,
//!             model: Some("models/clock.glb"),
//!             scale: (0.1, 0.1, 0.1),
//!             offset: (0.0, -0.5, 0.0),
//!             primary_audio: Some("sounds/story_my.mp3"),
//!             alternate_audio: Some("sounds/story_en.mp3"),
//!         ),
//!     ],
//! )
//! ```

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;
use waymark::NarrationMode;

use crate::anchor::{AnchorContent, AnchorNarration, MarkerAnchor};
use crate::content::ContentLibrary;
use crate::plugin::WaymarkPluginConfig;

const MANIFEST_EXTENSIONS: &[&str] = &["anchors.ron", "anchors"];

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_volume() -> f32 {
    0.5
}

/// One target entry of a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorEntry {
    /// Marker index inside the tracking bundle.
    pub target: usize,
    /// Model asset path to clone onto the anchor, if any.
    #[serde(default)]
    pub model: Option<String>,
    /// Scale applied to the content clone.
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Position offset of the clone relative to the anchor.
    #[serde(default)]
    pub offset: [f32; 3],
    /// Audio path for the single-click track.
    #[serde(default)]
    pub primary_audio: Option<String>,
    /// Audio path for the double-click track.
    #[serde(default)]
    pub alternate_audio: Option<String>,
    /// Narration volume for this anchor.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Whether narration tracks loop until the marker is lost.
    #[serde(default)]
    pub looped: bool,
    /// Gesture-gated narration or ambient animation.
    #[serde(default)]
    pub mode: NarrationMode,
}

/// Manifest asset describing a complete marker experience.
#[derive(Asset, Clone, TypePath, Deserialize)]
pub struct AnchorManifest {
    /// Opaque marker-description path handed to the tracking backend.
    #[serde(default)]
    pub marker_bundle: Option<String>,
    /// One entry per tracked target.
    pub anchors: Vec<AnchorEntry>,
}

impl AnchorManifest {
    /// Whether the manifest declares no targets.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Loader for `.anchors.ron` assets.
#[derive(Default)]
pub struct AnchorManifestLoader;

impl AssetLoader for AnchorManifestLoader {
    type Asset = AnchorManifest;
    type Settings = ();
    type Error = anyhow::Error;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let manifest: AnchorManifest = ron::de::from_bytes(&bytes)
            .map_err(|err| crate::error::BevyWaymarkError::invalid_manifest(err.to_string()))?;
        Ok(manifest)
    }

    fn extensions(&self) -> &[&str] {
        MANIFEST_EXTENSIONS
    }
}

/// Component that spawns the anchors of a manifest once the asset is ready.
#[derive(Component)]
pub struct ManifestSource {
    /// The manifest asset to realize.
    pub manifest: Handle<AnchorManifest>,
    spawned: bool,
}

impl ManifestSource {
    /// Realize a manifest once it finishes loading.
    pub fn new(manifest: Handle<AnchorManifest>) -> Self {
        Self {
            manifest,
            spawned: false,
        }
    }

    /// Whether the manifest's anchors were already spawned.
    pub fn is_spawned(&self) -> bool {
        self.spawned
    }
}

/// Spawn anchor entities for every loaded, not-yet-realized manifest.
pub(crate) fn spawn_manifest_anchors(
    mut commands: Commands,
    mut sources: Query<&mut ManifestSource>,
    manifests: Res<Assets<AnchorManifest>>,
    mut library: ResMut<ContentLibrary>,
    asset_server: Res<AssetServer>,
    config: Res<WaymarkPluginConfig>,
) {
    for mut source in sources.iter_mut() {
        if source.spawned {
            continue;
        }
        let Some(manifest) = manifests.get(&source.manifest) else {
            continue;
        };

        for entry in &manifest.anchors {
            let anchor = MarkerAnchor::new(entry.target)
                .with_click_window(config.click_window)
                .with_mode(entry.mode);
            let mut spawned = commands.spawn(anchor);

            if let Some(model) = &entry.model {
                library.request(model.clone(), &asset_server);
                spawned.insert(
                    AnchorContent::new(model.clone())
                        .with_scale(Vec3::from_array(entry.scale))
                        .with_offset(Vec3::from_array(entry.offset)),
                );
            }

            if entry.primary_audio.is_some() || entry.alternate_audio.is_some() {
                spawned.insert(AnchorNarration {
                    primary: entry.primary_audio.as_ref().map(|p| asset_server.load(p)),
                    alternate: entry.alternate_audio.as_ref().map(|p| asset_server.load(p)),
                    volume: entry.volume.clamp(0.0, 1.0),
                    looped: entry.looped,
                });
            }
        }

        info!("Spawned {} anchors from manifest", manifest.anchors.len());
        source.spawned = true;
    }
}

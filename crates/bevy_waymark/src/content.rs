//! Content template cache and clone-on-attach
//!
//! Models are loaded once per asset path into a [`ContentLibrary`] and
//! cloned onto anchors as they attach; the template is never reloaded for
//! repeated found/lost cycles. Loads are result-typed: a failed template
//! leaves its anchors content-less without touching the render loop, and a
//! clip-less model degrades to a no-op animation.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::anchor::{AnchorContent, AnchorContentRoot, AnimationBinding};
use crate::error::BevyWaymarkError;

/// Load lifecycle of one model template.
pub enum TemplateState {
    /// The glTF is still being fetched/parsed.
    Loading(Handle<Gltf>),
    /// Scene and clips extracted; ready to clone.
    Ready(ContentTemplate),
    /// The load failed; anchors referencing it stay content-less.
    Failed,
}

/// A loaded model template ready for cloning onto anchors.
#[derive(Clone)]
pub struct ContentTemplate {
    /// The model's scene-graph root.
    pub scene: Handle<Scene>,
    /// First animation clip, the one gestures replay.
    pub first_clip: Option<Handle<AnimationClip>>,
    /// Number of clips the model shipped with.
    pub clip_count: usize,
}

/// Cache of model templates keyed by asset path.
#[derive(Resource, Default)]
pub struct ContentLibrary {
    templates: HashMap<String, TemplateState>,
}

impl ContentLibrary {
    /// Begin loading a template unless it is already known.
    pub fn request(&mut self, path: impl Into<String>, asset_server: &AssetServer) {
        let path = path.into();
        if self.templates.contains_key(&path) {
            return;
        }
        let handle = asset_server.load::<Gltf>(path.clone());
        self.templates.insert(path, TemplateState::Loading(handle));
    }

    /// Load state of a template, if it was ever requested.
    pub fn state(&self, path: &str) -> Option<&TemplateState> {
        self.templates.get(path)
    }

    /// The ready template for a path, if the load completed.
    pub fn template(&self, path: &str) -> Option<&ContentTemplate> {
        match self.templates.get(path) {
            Some(TemplateState::Ready(template)) => Some(template),
            _ => None,
        }
    }

    /// Whether the template's load failed.
    pub fn is_failed(&self, path: &str) -> bool {
        matches!(self.templates.get(path), Some(TemplateState::Failed))
    }

    /// Insert a ready-made template, bypassing asset loading. Used by tests
    /// and procedurally generated content.
    pub fn insert_ready(&mut self, path: impl Into<String>, template: ContentTemplate) {
        self.templates.insert(path.into(), TemplateState::Ready(template));
    }
}

/// Check loading templates and extract scenes/clips from finished glTFs.
pub(crate) fn poll_content_loads(
    mut library: ResMut<ContentLibrary>,
    asset_server: Res<AssetServer>,
    gltf_assets: Option<Res<Assets<Gltf>>>,
) {
    let Some(gltf_assets) = gltf_assets else {
        return;
    };

    let loading: Vec<String> = library
        .templates
        .iter()
        .filter_map(|(path, state)| {
            matches!(state, TemplateState::Loading(_)).then(|| path.clone())
        })
        .collect();

    for path in loading {
        let Some(TemplateState::Loading(handle)) = library.templates.get(&path) else {
            continue;
        };

        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                let Some(gltf) = gltf_assets.get(handle) else {
                    continue;
                };
                let Some(scene) = gltf
                    .default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned())
                else {
                    error!(
                        "{}",
                        BevyWaymarkError::content_load(path.as_str(), "no scenes")
                    );
                    library.templates.insert(path, TemplateState::Failed);
                    continue;
                };

                let clip_count = gltf.animations.len();
                if clip_count == 0 {
                    warn!("{}", BevyWaymarkError::MissingAnimation(path.clone()));
                }

                info!("Content template ready: {path} ({clip_count} clips)");
                library.templates.insert(
                    path,
                    TemplateState::Ready(ContentTemplate {
                        scene,
                        first_clip: gltf.animations.first().cloned(),
                        clip_count,
                    }),
                );
            }
            Some(LoadState::Failed(err)) => {
                error!(
                    "{}",
                    BevyWaymarkError::content_load(path.as_str(), err.to_string())
                );
                library.templates.insert(path, TemplateState::Failed);
            }
            _ => {
                // Still loading.
            }
        }
    }
}

/// Clone a ready template under an anchor entity.
///
/// Returns the content child plus the animation binding when the model has
/// clips and a graph store is available.
pub(crate) fn spawn_content_clone(
    commands: &mut Commands,
    anchor_entity: Entity,
    target: usize,
    content: &AnchorContent,
    template: &ContentTemplate,
    graphs: Option<&mut Assets<AnimationGraph>>,
) -> (Entity, Option<AnimationBinding>) {
    let child = commands
        .spawn((
            SceneRoot(template.scene.clone()),
            Transform::from_translation(content.offset).with_scale(content.scale),
            Visibility::Inherited,
            AnchorContentRoot { target },
        ))
        .id();
    commands.entity(anchor_entity).add_child(child);

    let binding = match (template.first_clip.as_ref(), graphs) {
        (Some(clip), Some(graphs)) => {
            let (graph, node) = AnimationGraph::from_clip(clip.clone());
            Some(AnimationBinding {
                graph: graphs.add(graph),
                node,
                player: None,
            })
        }
        _ => None,
    };

    (child, binding)
}

use bevy::prelude::Resource;
use std::time::Duration;
use waymark::DEFAULT_CLICK_WINDOW;

/// Configuration object used to enable/disable individual subsystems of the
/// plugin and tune interaction timing.
#[derive(Debug, Clone, Resource)]
pub struct WaymarkPluginConfig {
    /// Click disambiguation window applied to manifest-spawned anchors.
    pub click_window: Duration,
    /// Translate left mouse presses into document-wide [`RawClick`](crate::RawClick)s.
    pub pointer_input: bool,
    /// Start the [`TrackingSession`](crate::TrackingSession) automatically
    /// once it is inserted.
    pub auto_start_session: bool,
    /// Emit [`AnchorAttached`](crate::AnchorAttached)/[`AnchorDetached`](crate::AnchorDetached) messages.
    pub lifecycle_events: bool,
    /// Spatialize narration against a camera listener.
    pub spatial_audio: bool,
    /// Register the RON manifest asset, loader and spawner.
    pub manifests: bool,
    /// Record attached-anchor/active-narration diagnostics.
    pub diagnostics: bool,
}

impl Default for WaymarkPluginConfig {
    fn default() -> Self {
        Self {
            click_window: DEFAULT_CLICK_WINDOW,
            pointer_input: true,
            auto_start_session: true,
            lifecycle_events: true,
            spatial_audio: false,
            manifests: true,
            diagnostics: true,
        }
    }
}

impl WaymarkPluginConfig {
    pub fn click_window(mut self, window: Duration) -> Self {
        self.click_window = window;
        self
    }

    pub fn pointer_input(mut self, enabled: bool) -> Self {
        self.pointer_input = enabled;
        self
    }

    pub fn auto_start_session(mut self, enabled: bool) -> Self {
        self.auto_start_session = enabled;
        self
    }

    pub fn lifecycle_events(mut self, enabled: bool) -> Self {
        self.lifecycle_events = enabled;
        self
    }

    pub fn spatial_audio(mut self, enabled: bool) -> Self {
        self.spatial_audio = enabled;
        self
    }

    pub fn manifests(mut self, enabled: bool) -> Self {
        self.manifests = enabled;
        self
    }

    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

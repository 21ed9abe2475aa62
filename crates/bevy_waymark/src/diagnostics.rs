use crate::anchor::MarkerAnchor;
use crate::plugin::WaymarkPluginConfig;
use bevy::diagnostic::{Diagnostic, DiagnosticPath, Diagnostics, RegisterDiagnostic};
use bevy::prelude::*;

pub const ANCHORS_ATTACHED_PATH: DiagnosticPath =
    DiagnosticPath::const_new("waymark/anchors_attached");
pub const NARRATIONS_ACTIVE_PATH: DiagnosticPath =
    DiagnosticPath::const_new("waymark/narrations_active");

pub fn register(app: &mut App) {
    app.register_diagnostic(Diagnostic::new(ANCHORS_ATTACHED_PATH));
    app.register_diagnostic(Diagnostic::new(NARRATIONS_ACTIVE_PATH));
}

pub fn update_diagnostics(
    config: Res<WaymarkPluginConfig>,
    mut diagnostics: Diagnostics,
    anchors: Query<&MarkerAnchor>,
) {
    if !config.diagnostics {
        return;
    }

    let mut attached = 0.0f64;
    let mut narrating = 0.0f64;

    for anchor in anchors.iter() {
        if anchor.is_attached() {
            attached += 1.0;
        }
        if anchor.narration().is_playing() {
            narrating += 1.0;
        }
    }

    diagnostics.add_measurement(&ANCHORS_ATTACHED_PATH, || attached);
    diagnostics.add_measurement(&NARRATIONS_ACTIVE_PATH, || narrating);
}

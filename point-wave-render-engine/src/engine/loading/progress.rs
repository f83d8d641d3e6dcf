use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextureLoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl TextureLoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureLoadState::Pending => "pending",
            TextureLoadState::Loaded => "loaded",
            TextureLoadState::Failed => "failed",
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub texture: TextureLoadState,
    pub surface_created: bool,
    /// The texture failed, so the point cloud was skipped.
    pub surface_unavailable: bool,
}

impl LoadingProgress {
    /// Loading is over once the surface exists or is known to be unavailable.
    pub fn is_settled(&self) -> bool {
        self.surface_created || self.surface_unavailable
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "config_resolved": self.config_resolved,
            "texture": self.texture.as_str(),
            "surface_created": self.surface_created,
            "surface_unavailable": self.surface_unavailable,
        })
    }
}

/// Push loading progress to the host page whenever it changes.
pub fn notify_loading_progress(
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if progress.is_changed() {
        rpc_interface.send_notification("loading_progress", progress.to_json());
    }
}

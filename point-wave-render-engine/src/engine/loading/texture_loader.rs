use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::loading::progress::{LoadingProgress, TextureLoadState};

/// Sprite texture requested once the configuration is resolved.
#[derive(Resource, Default)]
pub struct PointTexture {
    pub handle: Option<Handle<Image>>,
}

/// Map an asset load state onto the loading pipeline. `None` while in flight.
pub fn texture_state_from(load_state: &LoadState) -> Option<TextureLoadState> {
    match load_state {
        LoadState::Loaded => Some(TextureLoadState::Loaded),
        LoadState::Failed(_) => Some(TextureLoadState::Failed),
        LoadState::NotLoaded | LoadState::Loading => None,
    }
}

// Check whether the sprite texture finished loading
pub fn check_texture_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    texture: Res<PointTexture>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.texture != TextureLoadState::Pending || !loading_progress.config_resolved {
        return;
    }

    let Some(handle) = &texture.handle else {
        return;
    };

    let Some(load_state) = asset_server.get_load_state(handle) else {
        return;
    };

    match &load_state {
        LoadState::Failed(err) => error!("Point texture failed to load: {}", err),
        LoadState::Loaded => info!("✓ Point texture loaded"),
        _ => {}
    }

    if let Some(state) = texture_state_from(&load_state) {
        loading_progress.texture = state;
    }
}

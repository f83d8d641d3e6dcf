use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::camera::Projection;
use constants::path::WAVE_CONFIG_PATH;

use crate::engine::camera::orbit_controls::{OrbitCamera, OrbitControls};
use crate::engine::config::wave_config::WaveConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_loader::PointTexture;
use crate::engine::wave::frame_updater::WaveClock;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<WaveConfig>>,
}

impl ConfigLoader {
    pub fn new(handle: Handle<WaveConfig>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn handle(&self) -> Option<&Handle<WaveConfig>> {
        self.handle.as_ref()
    }
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading wave configuration from {}", WAVE_CONFIG_PATH);
    *config_loader = ConfigLoader::new(asset_server.load(WAVE_CONFIG_PATH));
}

// Resolve the configuration, then start the texture load
pub fn resolve_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<WaveConfig>>,
    mut active_config: ResMut<WaveConfig>,
    mut clock: ResMut<WaveClock>,
    mut controls: ResMut<OrbitControls>,
    mut cameras: Query<&mut Projection, With<OrbitCamera>>,
    mut texture: ResMut<PointTexture>,
) {
    if loading_progress.config_resolved {
        return;
    }

    let Some(handle) = config_loader.handle() else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("✓ Wave configuration loaded");
        config.clone().or_default_if_invalid()
    } else {
        match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(err)) => {
                warn!("Wave configuration unavailable ({}), using defaults", err);
                WaveConfig::default()
            }
            _ => return,
        }
    };

    apply_startup_config(&config, &mut clock, &mut controls);
    for mut projection in &mut cameras {
        *projection = controls.projection();
    }

    info!("Loading point texture from {}", config.texture_path);
    texture.handle = Some(asset_server.load(config.texture_path.clone()));

    *active_config = config;
    loading_progress.config_resolved = true;
}

/// Reset clock and camera to a freshly resolved configuration.
pub fn apply_startup_config(config: &WaveConfig, clock: &mut WaveClock, controls: &mut OrbitControls) {
    *clock = WaveClock::new(config.tick_step);
    *controls = OrbitControls::from_config(&config.camera);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_resets_clock_and_camera() {
        let mut config = WaveConfig::default();
        config.tick_step = 5.0;
        config.camera.position = [0.0, 0.0, 50.0];
        config.camera.auto_rotate = false;

        let mut clock = WaveClock::default();
        clock.advance();
        let mut controls = OrbitControls::default();

        apply_startup_config(&config, &mut clock, &mut controls);

        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.advance(), 5.0);
        assert!(!controls.auto_rotate);
        assert!(controls.camera_position().distance(Vec3::new(0.0, 0.0, 50.0)) < 1e-3);
    }
}

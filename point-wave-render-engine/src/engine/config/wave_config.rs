use bevy::prelude::*;
use constants::camera::{AUTO_ROTATE_SPEED, CAMERA_FOV_DEGREES, CAMERA_START_POSITION, DAMPING_FACTOR};
use constants::render_settings::{
    POINT_ALPHA_TEST, POINT_COLOUR_HEX, POINT_SIZE, POINT_SIZE_ATTENUATION,
};
use constants::texture::POINT_TEXTURE_PATH;
use constants::wave::TICK_STEP;
use serde::{Deserialize, Serialize};

use super::error::WaveConfigError;
use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::loading::config_loader::ConfigLoader;
use crate::engine::mesh::point_sprite_mesh::{WavePoints, create_point_sprite_mesh};
use crate::engine::shaders::PointSpriteMaterial;
use crate::engine::wave::frame_updater::{WaveClock, WaveSurface};
use crate::engine::wave::grid::GridParams;
use crate::engine::wave::height::WaveParams;

/// Complete runtime configuration. Every field falls back to its compile-time
/// default when absent from the JSON file.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub grid: GridParams,
    pub wave: WaveParams,
    pub tick_step: f64,
    pub camera: CameraConfig,
    pub points: PointStyleConfig,
    pub texture_path: String,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            wave: WaveParams::default(),
            tick_step: TICK_STEP,
            camera: CameraConfig::default(),
            points: PointStyleConfig::default(),
            texture_path: POINT_TEXTURE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: CAMERA_START_POSITION,
            target: [0.0; 3],
            fov_degrees: CAMERA_FOV_DEGREES,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            enable_damping: false,
            damping_factor: DAMPING_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyleConfig {
    pub size: f32,
    /// sRGB hex, with or without a leading `#`.
    pub colour: String,
    pub alpha_test: f32,
    pub size_attenuation: bool,
}

impl Default for PointStyleConfig {
    fn default() -> Self {
        Self {
            size: POINT_SIZE,
            colour: POINT_COLOUR_HEX.to_string(),
            alpha_test: POINT_ALPHA_TEST,
            size_attenuation: POINT_SIZE_ATTENUATION,
        }
    }
}

impl PointStyleConfig {
    pub fn colour(&self) -> Result<Color, WaveConfigError> {
        Ok(Srgba::hex(&self.colour)?.into())
    }
}

impl WaveConfig {
    pub fn validate(&self) -> Result<(), WaveConfigError> {
        self.grid.validate()?;
        self.wave.validate()?;

        if !self.tick_step.is_finite() || self.tick_step <= 0.0 {
            return Err(WaveConfigError::InvalidTickStep(self.tick_step));
        }

        let fov = self.camera.fov_degrees;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            return Err(WaveConfigError::InvalidFieldOfView(fov));
        }

        let size = self.points.size;
        if !size.is_finite() || size <= 0.0 {
            return Err(WaveConfigError::InvalidPointSize(size));
        }

        self.points.colour()?;
        Ok(())
    }

    /// The config itself when valid, otherwise the defaults.
    pub fn or_default_if_invalid(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                error!("Invalid wave configuration, using defaults: {}", err);
                Self::default()
            }
        }
    }
}

/// Apply edits to the loaded config asset while the app runs.
///
/// The surface is regenerated only when its grid or wave parameters changed;
/// tick step, camera behaviour and sprite style apply in place.
pub fn apply_wave_config_changes(
    mut events: EventReader<AssetEvent<WaveConfig>>,
    loader: Res<ConfigLoader>,
    configs: Res<Assets<WaveConfig>>,
    mut active: ResMut<WaveConfig>,
    mut clock: ResMut<WaveClock>,
    mut controls: ResMut<OrbitControls>,
    surface: Option<ResMut<WaveSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
    points: Query<&MeshMaterial3d<PointSpriteMaterial>, With<WavePoints>>,
) {
    let Some(handle) = loader.handle() else {
        return;
    };

    let modified = events
        .read()
        .any(|event| event.is_modified(handle.id()));
    if !modified {
        return;
    }

    let Some(updated) = configs.get(handle) else {
        return;
    };

    let updated = updated.clone().or_default_if_invalid();
    if *active == updated {
        return;
    }

    info!("Wave configuration changed, applying");
    clock.set_step(updated.tick_step);
    controls.apply_behaviour(&updated.camera);

    if let Some(mut surface) = surface {
        if surface.reconfigure(updated.grid, updated.wave) {
            let mesh = create_point_sprite_mesh(surface.buffer_mut());
            if let Some(existing) = meshes.get_mut(&surface.mesh) {
                *existing = mesh;
            }
            info!(
                "Surface regenerated with {} points",
                updated.grid.point_count()
            );
        }
    }

    for material in &points {
        if let Some(material) = materials.get_mut(&material.0) {
            material.apply_style(&updated.points);
        }
    }

    *active = updated;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::wave::position_buffer::PositionBuffer;

    fn hot_reload_app() -> (App, Handle<WaveConfig>) {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                watch_for_changes_override: Some(false),
                ..default()
            },
        ));
        app.init_asset::<WaveConfig>()
            .init_asset::<Mesh>()
            .init_asset::<PointSpriteMaterial>();

        let config = WaveConfig {
            grid: GridParams::new(2, 3.0).unwrap(),
            ..default()
        };
        let handle = app
            .world_mut()
            .resource_mut::<Assets<WaveConfig>>()
            .add(config.clone());

        let mesh = create_point_sprite_mesh(&PositionBuffer::generate(&config.grid, &config.wave));
        let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
        let material = app
            .world_mut()
            .resource_mut::<Assets<PointSpriteMaterial>>()
            .add(PointSpriteMaterial::new(Handle::default(), &config.points));
        app.world_mut()
            .spawn((MeshMaterial3d(material), WavePoints));

        app.insert_resource(WaveSurface::new(config.grid, config.wave, mesh))
            .insert_resource(ConfigLoader::new(handle.clone()))
            .insert_resource(config)
            .init_resource::<WaveClock>()
            .init_resource::<OrbitControls>()
            .add_systems(Update, apply_wave_config_changes);

        app.update();
        (app, handle)
    }

    fn edit_config(app: &mut App, handle: &Handle<WaveConfig>, edit: impl FnOnce(&mut WaveConfig)) {
        let mut configs = app.world_mut().resource_mut::<Assets<WaveConfig>>();
        edit(configs.get_mut(handle).unwrap());
        app.update();
        app.update();
    }

    fn mesh_vertex_count(app: &App) -> usize {
        let surface = app.world().resource::<WaveSurface>();
        app.world()
            .resource::<Assets<Mesh>>()
            .get(&surface.mesh)
            .unwrap()
            .count_vertices()
    }

    #[test]
    fn tick_step_and_camera_apply_without_regeneration() {
        let (mut app, handle) = hot_reload_app();
        edit_config(&mut app, &handle, |config| {
            config.tick_step = 5.0;
            config.camera.auto_rotate = false;
        });

        assert_eq!(app.world().resource::<WaveClock>().step(), 5.0);
        assert!(!app.world().resource::<OrbitControls>().auto_rotate);
        assert_eq!(app.world().resource::<WaveSurface>().generations(), 1);
        assert_eq!(mesh_vertex_count(&app), 4 * 4);
        assert_eq!(app.world().resource::<WaveConfig>().tick_step, 5.0);
    }

    #[test]
    fn grid_change_regenerates_surface_and_mesh() {
        let (mut app, handle) = hot_reload_app();
        edit_config(&mut app, &handle, |config| {
            config.grid = GridParams::new(4, 3.0).unwrap();
        });

        let surface = app.world().resource::<WaveSurface>();
        assert_eq!(surface.generations(), 2);
        assert_eq!(surface.buffer().unwrap().len(), 3 * 16);
        assert_eq!(mesh_vertex_count(&app), 16 * 4);
    }

    #[test]
    fn style_change_updates_material() {
        let (mut app, handle) = hot_reload_app();
        edit_config(&mut app, &handle, |config| {
            config.points.colour = "ffffff".to_string();
        });

        let materials = app.world().resource::<Assets<PointSpriteMaterial>>();
        let (_, material) = materials.iter().next().unwrap();
        assert_eq!(material.settings.colour, Vec4::ONE);
        assert_eq!(app.world().resource::<WaveSurface>().generations(), 1);
    }

    #[test]
    fn invalid_edit_falls_back_to_defaults() {
        let (mut app, handle) = hot_reload_app();
        edit_config(&mut app, &handle, |config| {
            config.grid.spacing = -1.0;
        });

        assert_eq!(*app.world().resource::<WaveConfig>(), WaveConfig::default());
        let surface = app.world().resource::<WaveSurface>();
        assert_eq!(surface.grid().count, 100);
        assert_eq!(mesh_vertex_count(&app), 10_000 * 4);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config: WaveConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WaveConfig::default());
        assert_eq!(config.grid.count, 100);
        assert_eq!(config.grid.spacing, 3.0);
        assert_eq!(config.wave.frequency, 0.002);
        assert_eq!(config.wave.amplitude, 3.0);
        assert_eq!(config.tick_step, 15.0);
        assert_eq!(config.camera.position, [100.0, 10.0, 0.0]);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.camera.auto_rotate_speed, -0.2);
        assert_eq!(config.points.size, 0.5);
        assert_eq!(config.points.alpha_test, 0.5);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let json = r##"{ "grid": { "count": 10 }, "points": { "colour": "#ff0000" } }"##;
        let config: WaveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.count, 10);
        assert_eq!(config.grid.spacing, 3.0);
        assert_eq!(config.points.size, 0.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.points.colour().unwrap(), Color::srgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(WaveConfig::default().validate().is_ok());
        let colour = WaveConfig::default().points.colour().unwrap();
        assert_eq!(colour, Color::srgb_u8(0x00, 0xaa, 0xff));
    }

    #[test]
    fn validation_names_the_problem() {
        let mut config = WaveConfig::default();
        config.grid.count = 0;
        assert!(matches!(config.validate(), Err(WaveConfigError::EmptyGrid)));

        let config: WaveConfig = serde_json::from_str(r#"{ "grid": { "count": 100000 } }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(WaveConfigError::GridTooLarge { .. })
        ));

        let mut config = WaveConfig::default();
        config.tick_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(WaveConfigError::InvalidTickStep(_))
        ));

        let mut config = WaveConfig::default();
        config.camera.fov_degrees = 180.0;
        assert!(matches!(
            config.validate(),
            Err(WaveConfigError::InvalidFieldOfView(_))
        ));

        let mut config = WaveConfig::default();
        config.points.colour = "not a colour".to_string();
        assert!(matches!(
            config.validate(),
            Err(WaveConfigError::PointColour(_))
        ));
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let mut config = WaveConfig::default();
        config.grid.spacing = -3.0;
        assert_eq!(config.or_default_if_invalid(), WaveConfig::default());
    }
}
